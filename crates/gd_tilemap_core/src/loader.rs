//! Loading tile map files
//!
//! A `.tilemap.json` file bundles a tileset and a map using it, so that an
//! object can be restored from a single file.

use crate::{TileMap, Tileset};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Error type for tile map loading failures
#[derive(Debug, Error)]
pub enum TileMapError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid map format: {0}")]
    InvalidFormat(String),
}

/// Self-contained tile map data: the tileset and the map using it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMapData {
    pub tileset: Tileset,
    pub map: TileMap,
}

impl TileMapData {
    /// Create a new empty map with the three default layers for a tileset
    pub fn new(tileset: Tileset, width: u32, height: u32) -> Self {
        let map = TileMap::new(tileset.id, width, height);
        Self { tileset, map }
    }

    /// Parse and validate from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TileMapError> {
        let data: TileMapData = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Load and validate from a file
    pub fn load(path: &Path) -> Result<Self, TileMapError> {
        let content = std::fs::read_to_string(path)?;
        let data = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            width = data.map.width,
            height = data.map.height,
            layers = data.map.layer_count(),
            "loaded tile map"
        );
        Ok(data)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TileMapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save to a file
    pub fn save(&self, path: &Path) -> Result<(), TileMapError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Check that the map is consistent with its tileset
    pub fn validate(&self) -> Result<(), TileMapError> {
        if self.map.tileset_id != self.tileset.id {
            return Err(TileMapError::InvalidFormat(format!(
                "map references tileset {} but the file contains tileset {}",
                self.map.tileset_id, self.tileset.id
            )));
        }
        if self.tileset.tile_width == 0 || self.tileset.tile_height == 0 {
            return Err(TileMapError::InvalidFormat(format!(
                "tileset '{}' has a zero tile size",
                self.tileset.name
            )));
        }
        if self.tileset.tile_count() > u64::from(u32::MAX) || self.tileset.atlas_size().is_none() {
            return Err(TileMapError::InvalidFormat(format!(
                "tileset '{}' is too large: {}x{} tiles of {}x{} pixels",
                self.tileset.name,
                self.tileset.columns,
                self.tileset.rows,
                self.tileset.tile_width,
                self.tileset.tile_height
            )));
        }

        for layer in &self.map.layers {
            if layer.width != self.map.width || layer.height != self.map.height {
                return Err(TileMapError::InvalidFormat(format!(
                    "layer '{}' is {}x{} but the map is {}x{}",
                    layer.name, layer.width, layer.height, self.map.width, self.map.height
                )));
            }
            if !layer.is_consistent() {
                return Err(TileMapError::InvalidFormat(format!(
                    "layer '{}' has {} tiles, expected {}",
                    layer.name,
                    layer.tiles.len(),
                    (layer.width as usize) * (layer.height as usize)
                )));
            }
            if let Some((column, row, tile)) =
                layer.occupied().find(|(_, _, t)| !self.tileset.contains(*t))
            {
                return Err(TileMapError::InvalidFormat(format!(
                    "layer '{}' uses tile {} at {};{} but tileset '{}' has {} tiles",
                    layer.name,
                    tile,
                    column,
                    row,
                    self.tileset.name,
                    self.tileset.tile_count()
                )));
            }
        }

        Ok(())
    }
}
