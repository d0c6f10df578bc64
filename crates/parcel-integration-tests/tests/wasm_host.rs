//! Drives the `extern "C"` surface the way the JavaScript host does,
//! starting from the bundled config.

use parcel_core::prelude::*;
use parcel_data::default_config;
use parcel_wasm::editor::{parcel_create, parcel_destroy};
use parcel_wasm::input::*;
use parcel_wasm::plan::{parcel_import_json, parcel_save_json};
use parcel_wasm::query::*;
use parcel_wasm::{
    FlatCell, FlatGlow, RESULT_BUFFER_TOO_SMALL, RESULT_FORMAT_ERROR, RESULT_INVALID_HANDLE,
    RESULT_OK,
};

fn create_default() -> i32 {
    let json = serde_json::to_string(&default_config().unwrap()).unwrap();
    let h = unsafe { parcel_create(json.as_ptr(), json.len() as i32) };
    assert!(h >= 0, "create failed with {h}");
    h
}

fn save(h: i32) -> String {
    // Ask for the size first, as the host does.
    let mut empty: Vec<u8> = Vec::new();
    let mut written = 0;
    let code = unsafe { parcel_save_json(h, empty.as_mut_ptr(), 0, &mut written) };
    assert_eq!(code, RESULT_BUFFER_TOO_SMALL);

    let mut buf = vec![0u8; written as usize];
    let code = unsafe { parcel_save_json(h, buf.as_mut_ptr(), buf.len() as i32, &mut written) };
    assert_eq!(code, RESULT_OK);
    String::from_utf8(buf).unwrap()
}

fn cell(h: i32, x: i32, y: i32) -> FlatCell {
    let mut out = FlatCell::default();
    assert_eq!(unsafe { parcel_cell_at(h, x, y, &mut out) }, RESULT_OK);
    out
}

#[test]
fn host_session_round_trip() {
    let h = create_default();

    let (mut w, mut ht) = (0, 0);
    unsafe { parcel_grid_size(h, &mut w, &mut ht) };
    assert_eq!((w, ht), (40, 20));

    // Straight belt, then a serial scanner turned once by the tool button.
    parcel_pointer_down(h, 0, 4);
    parcel_pointer_enter(h, 1, 4);
    parcel_pointer_enter(h, 2, 4);
    parcel_leave_grid(h);
    parcel_pointer_enter(h, 3, 4);
    assert_eq!(cell(h, 3, 4).cell_type, 0);

    parcel_select_tool(h, 7);
    parcel_rotate_tool(h);
    parcel_pointer_down(h, 3, 4);
    parcel_pointer_up(h);
    assert_eq!(
        cell(h, 3, 4),
        FlatCell {
            x: 3,
            y: 4,
            cell_type: 3,
            kind: 7,
            rotation: 90
        }
    );

    let mut glows = [FlatGlow::default(); 8];
    let mut count = 0;
    let bytes = std::mem::size_of_val(&glows) as i32;
    let code = unsafe { parcel_glows(h, glows.as_mut_ptr() as *mut u8, bytes, &mut count) };
    assert_eq!(code, RESULT_OK);
    assert_eq!(
        &glows[..count as usize],
        &[
            FlatGlow { x: 2, y: 4, kind: 0 },
            FlatGlow { x: 4, y: 4, kind: 2 },
        ]
    );

    // Move the JSON into a second editor and compare with the core model.
    let json = save(h);
    let plan = FactoryPlan::from_json(&json).unwrap();
    assert_eq!(plan.cells.iter().filter(|c| c.is_occupied()).count(), 4);

    let other = create_default();
    let code = unsafe { parcel_import_json(other, json.as_ptr(), json.len() as i32) };
    assert_eq!(code, RESULT_OK);
    assert_eq!(save(other), json);

    assert_eq!(parcel_destroy(h), RESULT_OK);
    assert_eq!(parcel_destroy(other), RESULT_OK);
    assert_eq!(parcel_pointer_up(h), RESULT_INVALID_HANDLE);
}

#[test]
fn rejected_import_leaves_grid_and_reports_message() {
    let h = create_default();
    parcel_pointer_down(h, 10, 10);
    parcel_pointer_up(h);
    let before = save(h);

    let text = r#"{"config": {"width": 40, "height": 20, "trucks": [], "outputs": []}}"#;
    let code = unsafe { parcel_import_json(h, text.as_ptr(), text.len() as i32) };
    assert_eq!(code, RESULT_FORMAT_ERROR);

    let mut buf = [0u8; 128];
    let mut written = 0;
    unsafe { parcel_last_error(h, buf.as_mut_ptr(), 128, &mut written) };
    assert_eq!(&buf[..written as usize], b"Invalid factory plan format");
    assert_eq!(save(h), before);

    let mut depth = 0;
    unsafe { parcel_undo_depth(h, &mut depth) };
    assert_eq!(depth, 1);

    assert_eq!(parcel_destroy(h), RESULT_OK);
}
