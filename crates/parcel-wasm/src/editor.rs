//! Editor lifecycle WASM exports.

use parcel_core::config::FactoryConfig;
use parcel_core::editor::Editor;
use tracing::warn;

use crate::{
    EditorSlot, RESULT_FORMAT_ERROR, RESULT_INTERNAL_ERROR, RESULT_INVALID_HANDLE,
    RESULT_PARSE_ERROR, RESULT_OK, read_utf8, with_table,
};

/// Create an editor from `factory_config.json` content at `config_ptr`
/// (length `config_len` bytes).
///
/// Returns a handle (>= 0) on success, or a negative error code:
/// - `-RESULT_PARSE_ERROR` if the bytes are not a JSON config
/// - `-RESULT_FORMAT_ERROR` if the config describes an impossible layout
/// - `-RESULT_INTERNAL_ERROR` if no handle slot is available
///
/// # Safety
///
/// `config_ptr` must point to at least `config_len` valid bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_create(config_ptr: *const u8, config_len: i32) -> i32 {
    let text = match unsafe { read_utf8(config_ptr, config_len) } {
        Ok(text) => text,
        Err(code) => return -code,
    };
    let config: FactoryConfig = match serde_json::from_str(text) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "factory config rejected");
            return -RESULT_PARSE_ERROR;
        }
    };
    if let Err(e) = config.validate() {
        warn!(error = %e, "factory config rejected");
        return -RESULT_FORMAT_ERROR;
    }

    with_table(|table| match table.iter().position(Option::is_none) {
        Some(i) => {
            table[i] = Some(EditorSlot::new(Editor::new(config)));
            i as i32
        }
        None => -RESULT_INTERNAL_ERROR,
    })
}

/// Destroy the editor at `handle` and free its slot.
///
/// Returns [`RESULT_OK`] on success, or [`RESULT_INVALID_HANDLE`] if the
/// handle is out of range or already destroyed.
#[unsafe(no_mangle)]
pub extern "C" fn parcel_destroy(handle: i32) -> i32 {
    with_table(|table| {
        let Ok(idx) = usize::try_from(handle) else {
            return RESULT_INVALID_HANDLE;
        };
        match table.get_mut(idx) {
            Some(slot @ Some(_)) => {
                *slot = None;
                RESULT_OK
            }
            _ => RESULT_INVALID_HANDLE,
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_EDITORS;
    use crate::test_support::{cleanup, create_small};

    fn create_from(json: &str) -> i32 {
        unsafe { parcel_create(json.as_ptr(), json.len() as i32) }
    }

    #[test]
    fn create_returns_valid_handle() {
        cleanup();
        let h = create_small();
        assert!(h >= 0);
        assert_eq!(parcel_destroy(h), RESULT_OK);
        cleanup();
    }

    #[test]
    fn create_rejects_bad_config() {
        cleanup();
        assert_eq!(create_from("{ nope"), -RESULT_PARSE_ERROR);
        assert_eq!(
            create_from(r#"{"width":0,"height":3,"trucks":[],"outputs":[]}"#),
            -RESULT_FORMAT_ERROR
        );
        cleanup();
    }

    #[test]
    fn create_rejects_oversized_grid() {
        cleanup();
        assert_eq!(
            create_from(r#"{"width":2147483649,"height":1,"trucks":[],"outputs":[]}"#),
            -RESULT_FORMAT_ERROR
        );
        assert_eq!(
            create_from(r#"{"width":4096,"height":4096,"trucks":[],"outputs":[]}"#),
            -RESULT_FORMAT_ERROR
        );
        cleanup();
    }

    #[test]
    fn create_rejects_invalid_utf8() {
        cleanup();
        let bytes = [0xffu8, 0xfe];
        let h = unsafe { parcel_create(bytes.as_ptr(), 2) };
        assert_eq!(h, -RESULT_PARSE_ERROR);
        assert_eq!(unsafe { parcel_create(std::ptr::null(), 0) }, -RESULT_INTERNAL_ERROR);
        cleanup();
    }

    #[test]
    fn destroy_invalid_handles() {
        cleanup();
        assert_eq!(parcel_destroy(-1), RESULT_INVALID_HANDLE);
        assert_eq!(parcel_destroy(MAX_EDITORS as i32), RESULT_INVALID_HANDLE);
        let h = create_small();
        assert_eq!(parcel_destroy(h), RESULT_OK);
        assert_eq!(parcel_destroy(h), RESULT_INVALID_HANDLE);
        cleanup();
    }

    #[test]
    fn table_is_bounded_and_slots_are_reused() {
        cleanup();
        let handles: Vec<i32> = (0..MAX_EDITORS).map(|_| create_small()).collect();
        assert!(handles.iter().all(|h| *h >= 0));
        assert_eq!(create_small(), -RESULT_INTERNAL_ERROR);

        assert_eq!(parcel_destroy(handles[3]), RESULT_OK);
        assert_eq!(create_small(), handles[3]);
        cleanup();
    }
}
