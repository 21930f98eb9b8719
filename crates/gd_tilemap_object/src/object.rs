//! Runtime tile map object

use std::any::Any;
use std::path::Path;

use gd_extension::RuntimeObject;
use gd_tilemap_core::{CollidableObject, MapOffset, Rect, TileMapData, TileMapError, TileMapView};

/// Full type name of the tile map object
pub const TILE_MAP_TYPE: &str = "TileMapObject::TileMap";

/// A tile map placed in a scene
///
/// The map data may be missing (not loaded yet); every query then behaves as
/// an empty map of size zero.
#[derive(Debug, Clone)]
pub struct RuntimeTileMapObject {
    name: String,
    position: [f32; 2],
    data: Option<TileMapData>,
}

impl RuntimeTileMapObject {
    /// Create a tile map object without map data
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            position: [0.0, 0.0],
            data: None,
        }
    }

    pub fn with_data(name: &str, data: TileMapData) -> Self {
        Self {
            data: Some(data),
            ..Self::new(name)
        }
    }

    /// Load map data from a `.tilemap.json` file, replacing the current data
    pub fn load(&mut self, path: &Path) -> Result<(), TileMapError> {
        self.data = Some(TileMapData::load(path)?);
        Ok(())
    }

    pub fn data(&self) -> Option<&TileMapData> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut TileMapData> {
        self.data.as_mut()
    }

    pub fn set_data(&mut self, data: Option<TileMapData>) {
        self.data = data;
    }

    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    pub fn set_position(&mut self, position: [f32; 2]) {
        self.position = position;
    }

    /// World placement of the map: the object position and the tile size
    pub fn offset(&self) -> MapOffset {
        let tile_size = self
            .data
            .as_ref()
            .map(|d| [d.tileset.tile_width as f32, d.tileset.tile_height as f32])
            .unwrap_or([0.0, 0.0]);
        MapOffset::new(self.position, tile_size)
    }

    /// View used by tile collision queries
    pub fn view(&self) -> TileMapView<'_> {
        TileMapView::new(
            self.data.as_ref().map(|d| &d.map),
            self.data.as_ref().map(|d| &d.tileset),
            self.offset(),
        )
    }

    /// Tile width in pixels
    pub fn get_tile_width(&self) -> f64 {
        self.data
            .as_ref()
            .map_or(0.0, |d| d.tileset.tile_width as f64)
    }

    /// Tile height in pixels
    pub fn get_tile_height(&self) -> f64 {
        self.data
            .as_ref()
            .map_or(0.0, |d| d.tileset.tile_height as f64)
    }

    /// Map width in tiles
    pub fn get_map_width(&self) -> f64 {
        self.data.as_ref().map_or(0.0, |d| d.map.width as f64)
    }

    /// Map height in tiles
    pub fn get_map_height(&self) -> f64 {
        self.data.as_ref().map_or(0.0, |d| d.map.height as f64)
    }

    /// Width in pixels
    pub fn get_width(&self) -> f64 {
        self.get_map_width() * self.get_tile_width()
    }

    /// Height in pixels
    pub fn get_height(&self) -> f64 {
        self.get_map_height() * self.get_tile_height()
    }
}

impl CollidableObject for RuntimeTileMapObject {
    fn bounding_box(&self) -> Rect {
        Rect::from_position_size(
            self.position,
            [self.get_width() as f32, self.get_height() as f32],
        )
    }
}

impl RuntimeObject for RuntimeTileMapObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn object_type(&self) -> &str {
        TILE_MAP_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Factory bound to the tile map object in the extension declaration
pub fn create_runtime_tile_map_object(name: &str) -> Box<dyn RuntimeObject> {
    Box::new(RuntimeTileMapObject::new(name))
}
