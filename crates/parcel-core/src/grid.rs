//! The 2D cell grid the editor mutates.

use std::collections::BTreeMap;

use crate::cell::{CellContent, GridCell};
use crate::config::FactoryConfig;
use crate::position::GridPosition;

/// A dense `width x height` grid of cells, stored row-major with row 0 at
/// the bottom. Every in-bounds coordinate has exactly one cell and each
/// cell's own `x`/`y` match its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<GridCell>,
}

impl Grid {
    /// Fresh grid for `config`: blocked cells pre-marked, everything else empty.
    ///
    /// `config` is expected to have passed [`FactoryConfig::validate`].
    pub fn from_config(config: &FactoryConfig) -> Self {
        Self::build(config, |_| None)
    }

    /// Rebuild a grid from a flat cell list by coordinate lookup.
    ///
    /// The first cell listed for a coordinate wins. Coordinates with no
    /// listed cell fall back to the config's blocked/empty default, and
    /// listed cells outside the config's bounds are ignored.
    pub fn from_plan_cells(config: &FactoryConfig, cells: &[GridCell]) -> Self {
        let mut by_pos: BTreeMap<GridPosition, &GridCell> = BTreeMap::new();
        for cell in cells {
            by_pos.entry(cell.position()).or_insert(cell);
        }
        Self::build(config, |pos| by_pos.get(&pos).map(|c| **c))
    }

    fn build<F>(config: &FactoryConfig, mut lookup: F) -> Self
    where
        F: FnMut(GridPosition) -> Option<GridCell>,
    {
        let mut cells = Vec::with_capacity(config.width as usize * config.height as usize);
        for y in 0..config.height as i32 {
            for x in 0..config.width as i32 {
                let pos = GridPosition::new(x, y);
                let cell = lookup(pos).unwrap_or_else(|| {
                    if config.is_blocked(pos) {
                        GridCell::blocked(x, y)
                    } else {
                        GridCell::empty(x, y)
                    }
                });
                cells.push(cell);
            }
        }
        Self {
            width: config.width,
            height: config.height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        self.index(pos).is_some()
    }

    fn index(&self, pos: GridPosition) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as u32, pos.y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, pos: GridPosition) -> Option<&GridCell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: GridPosition) -> Option<&mut GridCell> {
        let i = self.index(pos)?;
        Some(&mut self.cells[i])
    }

    /// All cells, bottom row first, left to right within a row.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Rows from the bottom (`y = 0`) up.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Reset every non-blocked cell to empty.
    pub fn clear_placements(&mut self) {
        for cell in &mut self.cells {
            if !cell.is_blocked() {
                cell.content = CellContent::Empty;
            }
        }
    }

    /// Number of cells carrying a belt or scanner.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }
}
