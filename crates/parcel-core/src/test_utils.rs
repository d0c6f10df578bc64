//! Fixture builders shared by unit, property and integration tests.

use crate::config::{FactoryConfig, OutputDock};
use crate::editor::Editor;
use crate::position::GridPosition;
use crate::rotation::Rotation;
use crate::tool::{Tool, ToolKind};

/// An 8x6 layout with one truck on the left margin and one dock on the right.
pub fn small_config() -> FactoryConfig {
    FactoryConfig {
        width: 8,
        height: 6,
        trucks: vec![GridPosition::new(-1, 2)],
        outputs: vec![OutputDock {
            x: 8,
            y: 3,
            types: vec!["Plane".to_string()],
        }],
        blocked: Vec::new(),
    }
}

/// [`small_config`] with the given cells blocked.
pub fn config_with_blocked(blocked: &[(i32, i32)]) -> FactoryConfig {
    let mut config = small_config();
    config.blocked = blocked
        .iter()
        .map(|&(x, y)| GridPosition::new(x, y))
        .collect();
    config
}

/// An editor on `config` with `placements` already painted, each as
/// `(x, y, tool kind, rotation)`. The history is left holding one entry
/// per placement.
pub fn editor_with(
    config: FactoryConfig,
    placements: &[(i32, i32, ToolKind, Rotation)],
) -> Editor {
    let mut editor = Editor::new(config);
    for &(x, y, kind, rotation) in placements {
        editor.set_tool(Tool::new(kind, rotation));
        editor.apply_tool(GridPosition::new(x, y));
    }
    editor.set_tool(Tool::default());
    editor
}
