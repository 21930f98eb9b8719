//! Tile map object extension
//!
//! Declares the `TileMap` object (size conditions, tile and map size
//! expressions) and the `SingleTileCollision` condition, and provides their
//! runtime implementation on top of `gd_tilemap_core`.

pub mod conditions;
mod extension;
mod object;

pub use conditions::single_tile_collision;
pub use extension::{declare_tile_map_object_extension, TileMapObjectExtension, EXTENSION_NAME};
pub use object::{create_runtime_tile_map_object, RuntimeTileMapObject, TILE_MAP_TYPE};
