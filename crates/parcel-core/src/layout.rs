//! Presentation helpers: responsive cell sizing and the visual grid a
//! renderer draws, including the one-cell margin that holds trucks and
//! output docks.

use crate::cell::GridCell;
use crate::config::{FactoryConfig, OutputDock};
use crate::editor::Editor;
use crate::glow::{GlowMap, GlowType};
use crate::grid::Grid;
use crate::position::GridPosition;

/// Smallest cell size in pixels.
pub const MIN_CELL_SIZE: u32 = 12;
/// Padding kept free inside the container, in pixels.
pub const CONTAINER_PADDING: f64 = 8.0;
/// Invisible rows/columns around the grid (one on each side).
pub const MARGIN_CELLS: u32 = 2;

/// Largest whole-pixel cell size that fits the grid plus its margin into a
/// `container_width x container_height` box, but never below
/// [`MIN_CELL_SIZE`].
pub fn cell_size(
    container_width: f64,
    container_height: f64,
    grid_width: u32,
    grid_height: u32,
) -> u32 {
    let visual_width = f64::from(grid_width) + f64::from(MARGIN_CELLS);
    let visual_height = f64::from(grid_height) + f64::from(MARGIN_CELLS);

    let available_width = (container_width - CONTAINER_PADDING).max(0.0);
    let available_height = (container_height - CONTAINER_PADDING).max(0.0);

    let by_width = available_width / visual_width;
    let by_height = available_height / visual_height;
    by_width.min(by_height).max(f64::from(MIN_CELL_SIZE)).floor() as u32
}

/// One slot of the visual grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualCell<'a> {
    Truck(GridPosition),
    Output(&'a OutputDock),
    Cell {
        cell: &'a GridCell,
        glow: Option<GlowType>,
        is_cursor: bool,
    },
    /// Empty margin slot.
    Margin(GridPosition),
}

/// The visual grid, top row first, including the margin ring.
///
/// Trucks take precedence over output docks, and both over grid cells.
pub fn visual_layout<'a>(
    config: &'a FactoryConfig,
    grid: &'a Grid,
    glows: &GlowMap,
    cursor: Option<GridPosition>,
) -> Vec<Vec<VisualCell<'a>>> {
    let visual_width = (grid.width() + MARGIN_CELLS) as i32;
    let visual_height = (grid.height() + MARGIN_CELLS) as i32;

    (0..visual_height)
        .rev()
        .map(|vy| {
            (0..visual_width)
                .map(|vx| {
                    let pos = GridPosition::new(vx - 1, vy - 1);
                    if config.truck_at(pos).is_some() {
                        return VisualCell::Truck(pos);
                    }
                    if let Some(dock) = config.output_at(pos) {
                        return VisualCell::Output(dock);
                    }
                    match grid.get(pos) {
                        Some(cell) => VisualCell::Cell {
                            cell,
                            glow: glows.get(pos),
                            is_cursor: cursor == Some(pos),
                        },
                        None => VisualCell::Margin(pos),
                    }
                })
                .collect()
        })
        .collect()
}

/// Visual grid for an editor's current state. The cursor is only shown in
/// edit mode.
pub fn editor_layout(editor: &Editor) -> Vec<Vec<VisualCell<'_>>> {
    let cursor = editor.is_edit_mode().then(|| editor.cursor());
    visual_layout(editor.config(), editor.grid(), &editor.glow_map(), cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Direction;
    use crate::rotation::Rotation;
    use crate::tool::{Tool, ToolKind};

    fn config() -> FactoryConfig {
        let mut config = FactoryConfig::new(3, 2);
        config.trucks.push(GridPosition::new(-1, 0));
        config.outputs.push(OutputDock {
            x: 3,
            y: 1,
            types: vec!["Plane".into()],
        });
        config
    }

    #[test]
    fn cell_size_fits_smaller_axis() {
        // 40x20 grid -> 42x22 visual; 1008/42 = 24, 708/22 = 32.18
        assert_eq!(cell_size(1016.0, 716.0, 40, 20), 24);
        assert_eq!(cell_size(2000.0, 230.0, 8, 8), 22);
    }

    #[test]
    fn cell_size_has_floor() {
        assert_eq!(cell_size(100.0, 100.0, 40, 20), MIN_CELL_SIZE);
        assert_eq!(cell_size(0.0, 0.0, 1, 1), MIN_CELL_SIZE);
        assert_eq!(cell_size(1016.0, 716.0, u32::MAX, u32::MAX), MIN_CELL_SIZE);
    }

    #[test]
    fn layout_dimensions_and_margin() {
        let config = config();
        let grid = Grid::from_config(&config);
        let rows = visual_layout(&config, &grid, &GlowMap::default(), None);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.len() == 5));
        // Top-left slot is margin at (-1, 2).
        assert_eq!(rows[0][0], VisualCell::Margin(GridPosition::new(-1, 2)));
        // Bottom-left grid cell sits at row 2, column 1.
        match &rows[2][1] {
            VisualCell::Cell { cell, .. } => assert_eq!(cell.position(), GridPosition::new(0, 0)),
            other => panic!("expected grid cell, got {other:?}"),
        }
    }

    #[test]
    fn layout_places_trucks_and_docks() {
        let config = config();
        let grid = Grid::from_config(&config);
        let rows = visual_layout(&config, &grid, &GlowMap::default(), None);
        assert_eq!(rows[2][0], VisualCell::Truck(GridPosition::new(-1, 0)));
        assert!(matches!(rows[1][4], VisualCell::Output(dock) if dock.types == ["Plane"]));
    }

    #[test]
    fn editor_layout_shows_glow_and_cursor() {
        let mut editor = Editor::new(config());
        editor.set_tool(Tool::new(ToolKind::WeightScanner, Rotation::Deg0));
        editor.apply_tool(GridPosition::new(1, 0));
        editor.toggle_edit_mode();
        editor.move_cursor(Direction::East);

        let rows = editor_layout(&editor);
        // (1, 1) is directly above the scanner: invalid output.
        match &rows[1][2] {
            VisualCell::Cell { glow, .. } => assert_eq!(*glow, Some(GlowType::Invalid)),
            other => panic!("expected grid cell, got {other:?}"),
        }
        match &rows[2][2] {
            VisualCell::Cell { cell, is_cursor, .. } => {
                assert_eq!(cell.position(), GridPosition::new(1, 0));
                assert!(*is_cursor);
            }
            other => panic!("expected grid cell, got {other:?}"),
        }
    }
}
