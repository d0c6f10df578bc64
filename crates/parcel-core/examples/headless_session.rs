//! Drive an editor without a UI: paint a small line with a scanner, print
//! the resulting glows, save the plan, then undo everything.
//!
//! Run with `RUST_LOG=debug` to see history tracing.

use parcel_core::layout::{VisualCell, editor_layout};
use parcel_core::prelude::*;

fn main() -> Result<(), PlanError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = FactoryConfig::new(10, 5);
    config.trucks.push(GridPosition::new(-1, 2));
    config.outputs.push(OutputDock {
        x: 10,
        y: 2,
        types: vec!["Plane".to_string()],
    });
    config.blocked.push(GridPosition::new(4, 4));

    let mut editor = Editor::new(config);

    // Drag a straight belt from the truck bay.
    editor.pointer_down(GridPosition::new(0, 2));
    for x in 1..4 {
        editor.pointer_enter(GridPosition::new(x, 2));
    }
    editor.pointer_up();

    // Drop a sticker checker at the end of the line.
    editor.select_tool(ToolKind::StickerChecker);
    editor.apply_tool(GridPosition::new(4, 2));

    for glow in editor.glows() {
        println!("glow at ({}, {}): {:?}", glow.x, glow.y, glow.kind);
    }

    for row in editor_layout(&editor) {
        let line: String = row
            .iter()
            .map(|slot| match slot {
                VisualCell::Truck(_) => 'T',
                VisualCell::Output(_) => 'O',
                VisualCell::Margin(_) => ' ',
                VisualCell::Cell { cell, glow, .. } => match (cell.cell_type(), glow) {
                    (CellType::Blocked, _) => '#',
                    (CellType::Conveyor, _) => '=',
                    (CellType::Scanner, _) => 'S',
                    (CellType::Empty, Some(GlowType::Invalid)) => 'x',
                    (CellType::Empty, Some(GlowType::NoSticker)) => '?',
                    (CellType::Empty, Some(GlowType::Valid)) => 'v',
                    (CellType::Empty, None) => '.',
                },
            })
            .collect();
        println!("{line}");
    }

    let json = editor.save_json()?;
    println!("saved plan: {} bytes", json.len());

    while editor.undo() {}
    println!("after undo: {} occupied cells", editor.grid().occupied_count());
    Ok(())
}
