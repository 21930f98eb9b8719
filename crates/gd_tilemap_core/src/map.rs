//! Tile maps and their placement in the world

use crate::{layer_index, Rect, TileLayer, Tileset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A grid of tiles split into layers, all sharing one tileset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    /// The tileset used by every layer
    pub tileset_id: Uuid,
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
    pub layers: Vec<TileLayer>,
}

impl TileMap {
    /// Create a map with the three conventional layers (back, middle, top)
    pub fn new(tileset_id: Uuid, width: u32, height: u32) -> Self {
        let layers = ["Back", "Middle", "Top"]
            .into_iter()
            .map(|name| TileLayer::new(name.to_string(), width, height))
            .collect();
        Self {
            tileset_id,
            width,
            height,
            layers,
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Resolve a layer from a signed index. Out of range layers resolve to None.
    pub fn layer(&self, index: i64) -> Option<&TileLayer> {
        usize::try_from(index).ok().and_then(|i| self.layers.get(i))
    }

    pub fn layer_mut(&mut self, index: i64) -> Option<&mut TileLayer> {
        usize::try_from(index).ok().and_then(|i| self.layers.get_mut(i))
    }

    /// Tile at a cell of a layer. Out of range layer or cell means no tile.
    pub fn tile_at(&self, layer: i64, column: i64, row: i64) -> Option<u32> {
        self.layer(layer).and_then(|l| l.get(column, row))
    }

    /// Set a tile. Returns false if the layer or cell is out of range.
    pub fn set_tile(&mut self, layer: i64, column: i64, row: i64, tile: Option<u32>) -> bool {
        self.layer_mut(layer)
            .is_some_and(|l| l.set(column, row, tile))
    }

    /// The middle layer, where solid tiles usually live
    pub fn middle(&self) -> Option<&TileLayer> {
        self.layers.get(layer_index::MIDDLE)
    }
}

/// World placement of a tile map: pixel origin plus per-axis tile dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapOffset {
    /// World position [x, y] of the top-left corner of cell (0, 0)
    pub origin: [f32; 2],
    /// Cell size [width, height] in pixels
    pub tile_size: [f32; 2],
}

impl MapOffset {
    pub fn new(origin: [f32; 2], tile_size: [f32; 2]) -> Self {
        Self { origin, tile_size }
    }

    /// Offset for a tileset placed at `origin`
    pub fn for_tileset(origin: [f32; 2], tileset: &Tileset) -> Self {
        Self::new(
            origin,
            [tileset.tile_width as f32, tileset.tile_height as f32],
        )
    }

    /// World rectangle covered by a cell
    pub fn cell_rect(&self, column: i64, row: i64) -> Rect {
        Rect::from_position_size(
            [
                self.origin[0] + column as f32 * self.tile_size[0],
                self.origin[1] + row as f32 * self.tile_size[1],
            ],
            self.tile_size,
        )
    }

    /// Cell containing a world point. None for degenerate tile sizes.
    pub fn cell_at(&self, point: [f32; 2]) -> Option<(i64, i64)> {
        if self.tile_size[0] <= 0.0 || self.tile_size[1] <= 0.0 {
            return None;
        }
        let column = ((point[0] - self.origin[0]) / self.tile_size[0]).floor();
        let row = ((point[1] - self.origin[1]) / self.tile_size[1]).floor();
        if !column.is_finite() || !row.is_finite() {
            return None;
        }
        Some((column as i64, row as i64))
    }
}
