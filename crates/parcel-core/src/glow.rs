//! Scanner output highlighting.
//!
//! Every scanner marks the neighbors its parcels leave through: the left
//! output receives parcels that fail the check (`Invalid`), the right
//! output receives parcels that pass (`Valid`). A sticker checker also
//! passes unstickered parcels straight through (`NoSticker`).
//!
//! Offsets come from a fixed table indexed by rotation. Nothing here is
//! bounds-checked; [`GlowMap::build`] drops glows that fall off the grid.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::ScannerKind;
use crate::grid::Grid;
use crate::position::GridPosition;
use crate::rotation::Rotation;

/// The highlight applied to a scanner's neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlowType {
    Invalid,
    NoSticker,
    Valid,
}

impl GlowType {
    /// Higher wins when two scanners light the same cell.
    pub fn priority(self) -> u8 {
        match self {
            GlowType::Invalid => 2,
            GlowType::NoSticker => 1,
            GlowType::Valid => 0,
        }
    }
}

/// A single highlighted neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlowEffect {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: GlowType,
}

impl GlowEffect {
    pub fn new(pos: GridPosition, kind: GlowType) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            kind,
        }
    }

    pub fn position(&self) -> GridPosition {
        GridPosition::new(self.x, self.y)
    }
}

/// Output offsets for one facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOffsets {
    pub straight: (i32, i32),
    pub left: (i32, i32),
    pub right: (i32, i32),
}

// Diagonal facings keep both side outputs on axis-aligned neighbors, so
// those rows are not 45 degree rotations of their cardinal neighbors.
const OUTPUT_TABLE: [OutputOffsets; 8] = [
    // 0: facing +x
    OutputOffsets {
        straight: (1, 0),
        left: (0, 1),
        right: (0, -1),
    },
    // 45
    OutputOffsets {
        straight: (1, 1),
        left: (1, 0),
        right: (0, -1),
    },
    // 90: facing +y
    OutputOffsets {
        straight: (0, 1),
        left: (-1, 0),
        right: (1, 0),
    },
    // 135
    OutputOffsets {
        straight: (-1, 1),
        left: (-1, 0),
        right: (0, -1),
    },
    // 180: facing -x
    OutputOffsets {
        straight: (-1, 0),
        left: (0, -1),
        right: (0, 1),
    },
    // 225
    OutputOffsets {
        straight: (-1, -1),
        left: (0, -1),
        right: (-1, 0),
    },
    // 270: facing -y
    OutputOffsets {
        straight: (0, -1),
        left: (1, 0),
        right: (-1, 0),
    },
    // 315
    OutputOffsets {
        straight: (1, -1),
        left: (0, -1),
        right: (1, 0),
    },
];

/// Output offsets for a scanner facing `rotation`.
pub fn output_offsets(rotation: Rotation) -> OutputOffsets {
    OUTPUT_TABLE[rotation.index()]
}

/// Glows for one scanner at `pos`.
///
/// Returns `[invalid, valid]`, or `[no_sticker, invalid, valid]` for a
/// sticker checker.
pub fn scanner_glows(pos: GridPosition, rotation: Rotation, kind: ScannerKind) -> Vec<GlowEffect> {
    let offsets = output_offsets(rotation);
    let at = |(dx, dy): (i32, i32)| pos.offset(dx, dy);

    let mut glows = Vec::with_capacity(3);
    if kind == ScannerKind::StickerChecker {
        glows.push(GlowEffect::new(at(offsets.straight), GlowType::NoSticker));
    }
    glows.push(GlowEffect::new(at(offsets.left), GlowType::Invalid));
    glows.push(GlowEffect::new(at(offsets.right), GlowType::Valid));
    glows
}

/// Glows for every scanner on the grid, in row-major scan order.
/// Overlapping glows are all kept.
pub fn all_scanner_glows(grid: &Grid) -> Vec<GlowEffect> {
    grid.cells()
        .iter()
        .filter_map(|cell| cell.scanner().map(|s| (cell.position(), s)))
        .flat_map(|(pos, s)| scanner_glows(pos, s.rotation, s.kind))
        .collect()
}

/// Glows resolved to one per in-grid cell, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlowMap {
    by_pos: BTreeMap<GridPosition, GlowType>,
}

impl GlowMap {
    /// Drop off-grid glows and keep the highest-priority glow per cell.
    pub fn build(grid: &Grid, glows: &[GlowEffect]) -> Self {
        let mut by_pos: BTreeMap<GridPosition, GlowType> = BTreeMap::new();
        for glow in glows {
            let pos = glow.position();
            if !grid.contains(pos) {
                continue;
            }
            by_pos
                .entry(pos)
                .and_modify(|existing| {
                    if glow.kind.priority() > existing.priority() {
                        *existing = glow.kind;
                    }
                })
                .or_insert(glow.kind);
        }
        Self { by_pos }
    }

    /// Shorthand for `build(grid, &all_scanner_glows(grid))`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::build(grid, &all_scanner_glows(grid))
    }

    pub fn get(&self, pos: GridPosition) -> Option<GlowType> {
        self.by_pos.get(&pos).copied()
    }

    pub fn len(&self) -> usize {
        self.by_pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridPosition, GlowType)> + '_ {
        self.by_pos.iter().map(|(p, g)| (*p, *g))
    }
}
