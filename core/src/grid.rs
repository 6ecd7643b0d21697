//! Coordinate to linear-index mapping for the world grid.

use serde::{Deserialize, Serialize};

use crate::TileIndex;

/// Width and height of a dense row-major grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    width: u32,
    height: u32,
}

impl GridDims {
    /// Creates grid dimensions from a column and row count.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reports whether the grid holds no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reports whether a continuous world position lies inside the grid.
    #[must_use]
    pub fn in_bounds(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && x < self.width as f32 && y >= 0.0 && y < self.height as f32
    }

    /// Maps a continuous position onto the tile containing it.
    ///
    /// Callers must check [`GridDims::in_bounds`] first; out-of-range
    /// coordinates are a contract violation.
    #[must_use]
    pub fn index(&self, x: f32, y: f32) -> TileIndex {
        debug_assert!(self.in_bounds(x, y), "({x}, {y}) lies outside {self:?}");
        TileIndex::new(y.floor() as usize * self.width as usize + x.floor() as usize)
    }

    /// Maps a position onto its tile, or `None` when it lies outside the grid.
    #[must_use]
    pub fn checked_index(&self, x: f32, y: f32) -> Option<TileIndex> {
        self.in_bounds(x, y).then(|| self.index(x, y))
    }

    /// Maps whole tile coordinates onto their index.
    #[must_use]
    pub fn tile(&self, column: u32, row: u32) -> Option<TileIndex> {
        if column < self.width && row < self.height {
            Some(TileIndex::new(
                row as usize * self.width as usize + column as usize,
            ))
        } else {
            None
        }
    }

    /// Recovers the column and row of a tile index.
    #[must_use]
    pub const fn coords(&self, index: TileIndex) -> (u32, u32) {
        let width = self.width as usize;
        ((index.get() % width) as u32, (index.get() / width) as u32)
    }
}
