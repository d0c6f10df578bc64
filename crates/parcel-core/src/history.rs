//! Undo history: a LIFO stack of full grid snapshots.

use std::collections::VecDeque;

use crate::grid::Grid;

/// Stack of grid snapshots taken before each mutation.
///
/// Unbounded by default. With a capacity, pushing onto a full history
/// evicts the oldest snapshot, so undo can only reach back that far.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: VecDeque<Grid>,
    capacity: Option<usize>,
    /// Snapshots ever pushed, including evicted ones.
    total_taken: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// A history holding at most `capacity` snapshots. `0` is clamped to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            capacity: Some(capacity.max(1)),
            total_taken: 0,
        }
    }

    /// Record a deep copy of `grid`.
    pub fn push(&mut self, grid: &Grid) {
        if let Some(cap) = self.capacity
            && self.snapshots.len() >= cap
        {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(grid.clone());
        self.total_taken += 1;
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<Grid> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn total_taken(&self) -> u64 {
        self.total_taken
    }
}
