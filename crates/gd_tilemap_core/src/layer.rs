//! Tile layers

use serde::{Deserialize, Serialize};

/// Conventional layer indices of a tile map
pub mod layer_index {
    pub const BACK: usize = 0;
    pub const MIDDLE: usize = 1;
    pub const TOP: usize = 2;
}

/// A single grid of tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    pub visible: bool,
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
    /// Row-major tile data - None means empty, Some(idx) is a tileset index
    pub tiles: Vec<Option<u32>>,
}

impl TileLayer {
    /// Create an empty layer
    pub fn new(name: String, width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            name,
            visible: true,
            width,
            height,
            tiles: vec![None; size],
        }
    }

    /// Index into `tiles`, or None if the cell is outside the layer
    pub fn cell_index(&self, column: i64, row: i64) -> Option<usize> {
        if column < 0 || row < 0 || column >= self.width as i64 || row >= self.height as i64 {
            return None;
        }
        Some(row as usize * self.width as usize + column as usize)
    }

    /// Tile at a cell. Out of range cells have no tile.
    pub fn get(&self, column: i64, row: i64) -> Option<u32> {
        self.cell_index(column, row)
            .and_then(|idx| self.tiles.get(idx).copied().flatten())
    }

    /// Set the tile at a cell. Returns false if the cell is outside the layer.
    pub fn set(&mut self, column: i64, row: i64, tile: Option<u32>) -> bool {
        let Some(idx) = self.cell_index(column, row) else {
            return false;
        };
        match self.tiles.get_mut(idx) {
            Some(slot) => {
                *slot = tile;
                true
            }
            None => false,
        }
    }

    /// Fill every cell with the same tile
    pub fn fill(&mut self, tile: Option<u32>) {
        self.tiles.iter_mut().for_each(|t| *t = tile);
    }

    /// Whether the tile data matches the declared dimensions
    pub fn is_consistent(&self) -> bool {
        self.tiles.len() == (self.width as usize) * (self.height as usize)
    }

    /// Iterate over non-empty cells as `(column, row, tile)`
    pub fn occupied(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let width = self.width.max(1);
        self.tiles.iter().enumerate().filter_map(move |(idx, tile)| {
            tile.map(|t| (idx as u32 % width, idx as u32 / width, t))
        })
    }
}
