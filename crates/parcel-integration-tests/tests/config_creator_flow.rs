//! Config creator to editor round trips.
//!
//! A layout is drawn in the creator, saved as `factory_config.json`,
//! picked up again through format detection and used to open an editor.

use std::fs;
use std::path::PathBuf;

use parcel_core::config_creator::{CONFIG_FILE_NAME, ConfigCreator, CreatorTool};
use parcel_core::prelude::*;
use parcel_data::loader::{CONFIG_BASE_NAME, find_data_file};
use parcel_data::{DataLoadError, load_factory_config};

fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "parcel_creator_test_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn pos(x: i32, y: i32) -> GridPosition {
    GridPosition::new(x, y)
}

fn drawn_layout() -> ConfigCreator {
    let mut creator = ConfigCreator::new();
    creator.width = 12;
    creator.height = 8;

    creator.click(pos(-1, 2), false);
    creator.click(pos(-1, 5), false);

    creator.tool = CreatorTool::Output;
    creator.output_types = "Plane, Ship".into();
    creator.click(pos(12, 3), false);
    creator.output_types = "Truck".into();
    creator.click(pos(5, 8), false);

    creator.tool = CreatorTool::Blocked;
    for x in 4..8 {
        creator.click(pos(x, 4), false);
    }
    // Changed our mind about one block.
    creator.click(pos(7, 4), true);
    creator
}

#[test]
fn saved_config_opens_in_editor() {
    let dir = make_test_dir("open");
    let creator = drawn_layout();
    fs::write(dir.join(CONFIG_FILE_NAME), creator.save_json().unwrap()).unwrap();

    let config = load_factory_config(&dir).unwrap();
    assert_eq!(config, creator.to_config());
    assert_eq!(config.outputs[0].types, vec!["Plane", "Ship"]);
    assert_eq!(config.blocked.len(), 3);

    let mut editor = Editor::new(config);
    editor.select_tool(ToolKind::Unloader);
    editor.pointer_down(pos(5, 4));
    editor.pointer_up();
    assert!(editor.grid().get(pos(5, 4)).unwrap().is_blocked());
    assert_eq!(editor.history_len(), 0);

    editor.pointer_down(pos(7, 4));
    editor.pointer_up();
    assert!(editor.grid().get(pos(7, 4)).unwrap().is_occupied());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn creator_reopens_saved_config() {
    let creator = drawn_layout();
    let json = creator.save_json().unwrap();
    let config: FactoryConfig = serde_json::from_str(&json).unwrap();

    let mut reopened = ConfigCreator::from_config(&config);
    assert_eq!(reopened.to_config(), config);

    reopened.tool = CreatorTool::Eraser;
    reopened.click(pos(12, 3), false);
    assert_eq!(reopened.outputs().len(), 1);
    assert_eq!(reopened.outputs()[0].types, vec!["Truck"]);
}

#[test]
fn config_edits_keep_plans_loadable() {
    let creator = drawn_layout();
    let old_config = creator.to_config();
    let mut editor = Editor::new(old_config);
    editor.select_tool(ToolKind::CountryScanner);
    editor.pointer_down(pos(11, 7));
    editor.pointer_up();
    let saved = editor.save_json().unwrap();

    // Shrink the layout; the plan still imports and out-of-range cells drop.
    let mut smaller = creator.clone();
    smaller.width = 6;
    let mut resized = Editor::new(smaller.to_config());
    resized.import_json(&saved).unwrap();
    assert_eq!(resized.grid().width(), 6);
    assert_eq!(resized.grid().occupied_count(), 0);
    assert!(resized.grid().get(pos(5, 4)).unwrap().is_blocked());
}

#[test]
fn conflicting_config_files_are_reported() {
    let dir = make_test_dir("conflict");
    let creator = drawn_layout();
    fs::write(dir.join(CONFIG_FILE_NAME), creator.save_json().unwrap()).unwrap();
    fs::write(dir.join("factory_config.toml"), "width = 1\nheight = 1\n").unwrap();

    assert!(matches!(
        find_data_file(&dir, CONFIG_BASE_NAME),
        Err(DataLoadError::ConflictingFormats { .. })
    ));
    assert!(load_factory_config(&dir).is_err());

    let _ = fs::remove_dir_all(&dir);
}
