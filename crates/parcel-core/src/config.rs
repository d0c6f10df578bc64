//! Static factory layout: dimensions, truck bays, output docks and
//! blocked cells. Loaded once and never mutated by the editor.

use serde::{Deserialize, Serialize};

use crate::position::GridPosition;

/// Largest accepted `width * height`. Also keeps every grid and margin
/// coordinate representable as `i32`.
pub const MAX_GRID_CELLS: u64 = 1 << 20;

/// An output dock and the parcel destinations it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDock {
    pub x: i32,
    pub y: i32,
    pub types: Vec<String>,
}

impl OutputDock {
    pub fn position(&self) -> GridPosition {
        GridPosition::new(self.x, self.y)
    }
}

/// The `factory_config.json` document.
///
/// Trucks and outputs usually sit in the one-cell margin around the grid,
/// so their coordinates may be `-1` or equal to `width`/`height`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryConfig {
    pub width: u32,
    pub height: u32,
    pub trucks: Vec<GridPosition>,
    pub outputs: Vec<OutputDock>,
    #[serde(default)]
    pub blocked: Vec<GridPosition>,
}

/// Errors from config validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("factory grid must be at least 1x1, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
    #[error("factory grid {width}x{height} exceeds {max} cells")]
    TooLarge { width: u32, height: u32, max: u64 },
    #[error("blocked cell ({x}, {y}) lies outside the {width}x{height} grid")]
    BlockedOutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    #[error("two {what} share position ({x}, {y})")]
    DuplicatePlacement { what: &'static str, x: i32, y: i32 },
}

impl FactoryConfig {
    /// An empty `width x height` layout with no trucks, docks or blocks.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            trucks: Vec::new(),
            outputs: Vec::new(),
            blocked: Vec::new(),
        }
    }

    /// Whether `pos` is inside the editable grid.
    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    pub fn is_blocked(&self, pos: GridPosition) -> bool {
        self.blocked.contains(&pos)
    }

    pub fn truck_at(&self, pos: GridPosition) -> Option<&GridPosition> {
        self.trucks.iter().find(|t| **t == pos)
    }

    pub fn output_at(&self, pos: GridPosition) -> Option<&OutputDock> {
        self.outputs.iter().find(|o| o.position() == pos)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        if u64::from(self.width) * u64::from(self.height) > MAX_GRID_CELLS {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
                max: MAX_GRID_CELLS,
            });
        }
        if let Some(b) = self.blocked.iter().find(|b| !self.contains(**b)) {
            return Err(ConfigError::BlockedOutOfBounds {
                x: b.x,
                y: b.y,
                width: self.width,
                height: self.height,
            });
        }
        if let Some(pos) = first_duplicate(self.trucks.iter().copied()) {
            return Err(ConfigError::DuplicatePlacement {
                what: "trucks",
                x: pos.x,
                y: pos.y,
            });
        }
        if let Some(pos) = first_duplicate(self.outputs.iter().map(OutputDock::position)) {
            return Err(ConfigError::DuplicatePlacement {
                what: "output docks",
                x: pos.x,
                y: pos.y,
            });
        }
        Ok(())
    }
}

fn first_duplicate(positions: impl Iterator<Item = GridPosition>) -> Option<GridPosition> {
    let mut seen = std::collections::HashSet::new();
    positions.into_iter().find(|p| !seen.insert(*p))
}
