//! Tileset configuration with per-tile collision masks

use crate::{CollisionShape, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

static FULL_TILE: CollisionShape = CollisionShape::Full;

/// Per-tile properties like collision and custom metadata
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TileProperties {
    /// Collision mask of this tile (Full unless edited)
    #[serde(default)]
    pub collision: CollisionShape,
    /// Custom user-defined properties
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom: HashMap<String, serde_json::Value>,
}

impl TileProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the collision mask for this tile
    pub fn with_collision(mut self, collision: CollisionShape) -> Self {
        self.collision = collision;
        self
    }

    /// Set a custom property
    pub fn with_custom(mut self, key: String, value: serde_json::Value) -> Self {
        self.custom.insert(key, value);
        self
    }

    /// Get a custom property
    pub fn get_custom(&self, key: &str) -> Option<&serde_json::Value> {
        self.custom.get(key)
    }

    /// Check if the properties are all default
    pub fn is_empty(&self) -> bool {
        self.collision == CollisionShape::Full && self.custom.is_empty()
    }
}

/// Resolved description of one tile of a tileset
#[derive(Debug, Clone, PartialEq)]
pub struct TileDefinition {
    pub index: u32,
    /// Size [width, height] in pixels
    pub size: [u32; 2],
    /// Collision mask, None when the tile is not collidable
    pub collision: Option<CollisionShape>,
}

impl TileDefinition {
    pub fn is_collidable(&self) -> bool {
        self.collision.is_some()
    }
}

/// A tileset: one atlas image cut into equally sized tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tileset {
    pub id: Uuid,
    pub name: String,
    /// Path to the atlas image (resolved by the host)
    #[serde(default)]
    pub image: String,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Spacing between tiles in the atlas, in pixels
    #[serde(default)]
    pub spacing: u32,
    pub columns: u32,
    pub rows: u32,
    /// Per-tile properties (collision, custom data)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tile_properties: HashMap<u32, TileProperties>,
}

impl Tileset {
    /// Create a new tileset from an atlas image
    pub fn new(
        name: String,
        image: String,
        tile_width: u32,
        tile_height: u32,
        columns: u32,
        rows: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            image,
            tile_width,
            tile_height,
            spacing: 0,
            columns,
            rows,
            tile_properties: HashMap::new(),
        }
    }

    /// Set the atlas spacing
    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Total number of tiles
    pub fn tile_count(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }

    /// Check whether a tile index exists in this tileset
    pub fn contains(&self, tile_index: u32) -> bool {
        u64::from(tile_index) < self.tile_count()
    }

    /// Atlas image size in pixels, or None if it does not fit in `u32`
    pub fn atlas_size(&self) -> Option<[u32; 2]> {
        let width = self
            .columns
            .checked_mul(self.tile_width.checked_add(self.spacing)?)?;
        let height = self
            .rows
            .checked_mul(self.tile_height.checked_add(self.spacing)?)?;
        Some([width, height])
    }

    /// Tile size [width, height] in pixels
    pub fn tile_size(&self) -> [u32; 2] {
        [self.tile_width, self.tile_height]
    }

    /// Get properties for a tile, if any were set
    pub fn get_tile_properties(&self, tile_index: u32) -> Option<&TileProperties> {
        self.tile_properties.get(&tile_index)
    }

    /// Get mutable properties for a tile, creating default if not exists
    pub fn get_tile_properties_mut(&mut self, tile_index: u32) -> &mut TileProperties {
        self.tile_properties.entry(tile_index).or_default()
    }

    /// Set properties for a tile
    pub fn set_tile_properties(&mut self, tile_index: u32, properties: TileProperties) {
        if properties.is_empty() {
            self.tile_properties.remove(&tile_index);
        } else {
            self.tile_properties.insert(tile_index, properties);
        }
    }

    /// Set the collision mask of a tile
    pub fn set_tile_collision(&mut self, tile_index: u32, collision: CollisionShape) {
        let props = self.get_tile_properties_mut(tile_index);
        props.collision = collision;
        // Clean up if properties are now empty
        if props.is_empty() {
            self.tile_properties.remove(&tile_index);
        }
    }

    /// Collision mask of a tile, or None if the index is outside the tileset
    pub fn collision_shape(&self, tile_index: u32) -> Option<&CollisionShape> {
        if !self.contains(tile_index) {
            return None;
        }
        Some(
            self.tile_properties
                .get(&tile_index)
                .map(|p| &p.collision)
                .unwrap_or(&FULL_TILE),
        )
    }

    /// Check if a tile has collision
    pub fn tile_has_collision(&self, tile_index: u32) -> bool {
        self.collision_shape(tile_index)
            .is_some_and(|shape| shape.has_collision())
    }

    /// Resolve the definition of a tile
    pub fn definition(&self, tile_index: u32) -> Option<TileDefinition> {
        let shape = self.collision_shape(tile_index)?;
        Some(TileDefinition {
            index: tile_index,
            size: self.tile_size(),
            collision: shape.has_collision().then(|| shape.clone()),
        })
    }

    /// Convert a tile index to (column, row) within the atlas
    pub fn index_to_grid(&self, tile_index: u32) -> Option<(u32, u32)> {
        if !self.contains(tile_index) || self.columns == 0 {
            return None;
        }
        Some((tile_index % self.columns, tile_index / self.columns))
    }

    /// Source rectangle of a tile within the atlas image
    pub fn texture_rect(&self, tile_index: u32) -> Option<Rect> {
        let (col, row) = self.index_to_grid(tile_index)?;
        let x = u64::from(col) * (u64::from(self.tile_width) + u64::from(self.spacing));
        let y = u64::from(row) * (u64::from(self.tile_height) + u64::from(self.spacing));
        Some(Rect::from_position_size(
            [x as f32, y as f32],
            [self.tile_width as f32, self.tile_height as f32],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tileset() -> Tileset {
        Tileset::new("Test".to_string(), "tiles.png".to_string(), 32, 32, 8, 4)
    }

    #[test]
    fn test_tiles_are_solid_by_default() {
        let tileset = tileset();

        assert_eq!(tileset.tile_count(), 32);
        assert!(tileset.tile_has_collision(0));
        assert_eq!(tileset.collision_shape(31), Some(&CollisionShape::Full));
        assert_eq!(tileset.collision_shape(32), None);
        assert!(!tileset.tile_has_collision(32));
    }

    #[test]
    fn test_definition() {
        let mut tileset = tileset();
        tileset.set_tile_collision(3, CollisionShape::None);

        let solid = tileset.definition(2).unwrap();
        assert_eq!(solid.size, [32, 32]);
        assert!(solid.is_collidable());

        let decoration = tileset.definition(3).unwrap();
        assert!(!decoration.is_collidable());

        assert!(tileset.definition(100).is_none());
    }

    #[test]
    fn test_default_properties_are_cleaned_up() {
        let mut tileset = tileset();
        tileset.set_tile_collision(5, CollisionShape::None);
        assert!(tileset.get_tile_properties(5).is_some());

        tileset.set_tile_collision(5, CollisionShape::Full);
        assert!(tileset.get_tile_properties(5).is_none());

        tileset.set_tile_properties(6, TileProperties::new());
        assert!(tileset.tile_properties.is_empty());
    }

    #[test]
    fn test_texture_rect_with_spacing() {
        let tileset = tileset().with_spacing(2);

        assert_eq!(tileset.index_to_grid(9), Some((1, 1)));
        let rect = tileset.texture_rect(9).unwrap();
        assert_eq!(rect.min, [34.0, 34.0]);
        assert_eq!(rect.max, [66.0, 66.0]);
        assert!(tileset.texture_rect(32).is_none());
    }

    #[test]
    fn test_huge_tileset_does_not_overflow() {
        let tileset = Tileset::new("Huge".to_string(), "huge.png".to_string(), 32, 32, 70000, 70000);

        assert_eq!(tileset.tile_count(), 4_900_000_000);
        assert!(tileset.contains(u32::MAX));
        assert_eq!(tileset.atlas_size(), None);

        let rect = tileset.texture_rect(69_999).unwrap();
        assert_eq!(rect.min, [2_239_968.0, 0.0]);
    }

    #[test]
    fn test_atlas_size() {
        assert_eq!(tileset().with_spacing(2).atlas_size(), Some([8 * 34, 4 * 34]));
    }

    #[test]
    fn test_tileset_json_keeps_properties() {
        let mut tileset = tileset();
        tileset.set_tile_collision(1, CollisionShape::rectangle([0.0, 0.5], [1.0, 0.5]));

        let json = serde_json::to_string(&tileset).unwrap();
        let parsed: Tileset = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, tileset.id);
        assert_eq!(
            parsed.collision_shape(1),
            Some(&CollisionShape::rectangle([0.0, 0.5], [1.0, 0.5]))
        );
    }
}
