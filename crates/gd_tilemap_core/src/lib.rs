//! Core data structures for tile map objects
//!
//! This crate provides the fundamental types for tile-based maps and the
//! tile collision query built on them:
//! - `TileMap` / `TileLayer` - Layered grids of tile indices
//! - `Tileset` / `TileDefinition` - Tile atlas with per-tile collision masks
//! - `CollisionShape` - Solid region of a tile (full, sub-rectangle, polygon)
//! - `MapOffset` - World placement of a map
//! - `test_tile_collision` - Does any object overlap a given tile?
//! - `TileMapData` - Self-contained file format bundling map and tileset
//!
//! # Example
//!
//! ```
//! use gd_tilemap_core::{test_tile_collision, MapOffset, ObjectBounds, TileMapData, TileMapView, Tileset};
//!
//! let tileset = Tileset::new("Ground".to_string(), "ground.png".to_string(), 32, 32, 4, 4);
//! let mut data = TileMapData::new(tileset, 10, 10);
//! data.map.set_tile(1, 2, 3, Some(0));
//!
//! let offset = MapOffset::for_tileset([0.0, 0.0], &data.tileset);
//! let view = TileMapView::new(Some(&data.map), Some(&data.tileset), offset);
//! let player = [ObjectBounds::new([64.0, 96.0], [16.0, 16.0])];
//! assert!(test_tile_collision(&view, 1, 2.0, 3.0, &player, false));
//! ```

mod collision;
mod geometry;
mod layer;
mod loader;
mod map;
mod query;
mod tileset;

pub use collision::CollisionShape;
pub use geometry::Rect;
pub use layer::{layer_index, TileLayer};
pub use loader::{TileMapData, TileMapError};
pub use map::{MapOffset, TileMap};
pub use query::{colliding_objects, test_tile_collision, CollidableObject, ObjectBounds, TileMapView};
pub use tileset::{TileDefinition, TileProperties, Tileset};
