//! Tile collision queries
//!
//! Tests whether objects overlap the solid part of a single tile. The query is
//! total: invalid layers, cells outside the map, empty cells, tiles without a
//! collision mask and missing maps or tilesets all answer "no collision"
//! instead of failing. Overlap uses closed intervals, so an object touching
//! the tile's edge collides with it.

use crate::{CollisionShape, MapOffset, Rect, TileMap, Tileset};

/// Anything exposing a world-space bounding box
pub trait CollidableObject {
    fn bounding_box(&self) -> Rect;
}

impl CollidableObject for Rect {
    fn bounding_box(&self) -> Rect {
        *self
    }
}

impl<T: CollidableObject + ?Sized> CollidableObject for &T {
    fn bounding_box(&self) -> Rect {
        (**self).bounding_box()
    }
}

/// Plain position + size object, for hosts without their own geometry type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectBounds {
    pub position: [f32; 2],
    pub size: [f32; 2],
}

impl ObjectBounds {
    pub fn new(position: [f32; 2], size: [f32; 2]) -> Self {
        Self { position, size }
    }
}

impl CollidableObject for ObjectBounds {
    fn bounding_box(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }
}

/// A tile map as seen by collision queries
///
/// Map and tileset are optional so that a map whose data is not loaded yet
/// can still be queried (always answering false).
#[derive(Debug, Clone, Copy)]
pub struct TileMapView<'a> {
    pub map: Option<&'a TileMap>,
    pub tileset: Option<&'a Tileset>,
    pub offset: MapOffset,
}

impl<'a> TileMapView<'a> {
    pub fn new(map: Option<&'a TileMap>, tileset: Option<&'a Tileset>, offset: MapOffset) -> Self {
        Self {
            map,
            tileset,
            offset,
        }
    }

    /// Resolve the world rectangle and collision mask of a solid tile.
    ///
    /// Column and row are floored to grid cells. Returns None whenever the
    /// cell holds nothing collidable.
    pub fn solid_tile(&self, layer: i64, column: f64, row: f64) -> Option<(Rect, &'a CollisionShape)> {
        let map = self.map?;
        let tileset = self.tileset?;
        if map.tileset_id != tileset.id {
            tracing::debug!(
                map_tileset = %map.tileset_id,
                tileset = %tileset.id,
                "tile map references a tileset that is not loaded"
            );
            return None;
        }

        let column = floor_to_cell(column)?;
        let row = floor_to_cell(row)?;
        let tile = map.tile_at(layer, column, row)?;
        let shape = tileset.collision_shape(tile)?;
        if !shape.has_collision() {
            return None;
        }
        Some((self.offset.cell_rect(column, row), shape))
    }
}

fn floor_to_cell(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    Some(value.floor() as i64)
}

/// Test whether any object overlaps the tile at (`column`, `row`) of `layer`.
///
/// `inverted` flips the final answer, for "is not in collision" conditions.
pub fn test_tile_collision<O: CollidableObject>(
    view: &TileMapView<'_>,
    layer: i64,
    column: f64,
    row: f64,
    objects: &[O],
    inverted: bool,
) -> bool {
    let colliding = match view.solid_tile(layer, column, row) {
        Some((cell, shape)) => objects
            .iter()
            .any(|object| shape.overlaps(&cell, &object.bounding_box())),
        None => false,
    };
    colliding != inverted
}

/// Indices of the objects overlapping the tile at (`column`, `row`) of `layer`
pub fn colliding_objects<O: CollidableObject>(
    view: &TileMapView<'_>,
    layer: i64,
    column: f64,
    row: f64,
    objects: &[O],
) -> Vec<usize> {
    let Some((cell, shape)) = view.solid_tile(layer, column, row) else {
        return Vec::new();
    };
    objects
        .iter()
        .enumerate()
        .filter(|(_, object)| shape.overlaps(&cell, &object.bounding_box()))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        map: TileMap,
        tileset: Tileset,
    }

    impl Fixture {
        /// 32x32 tiles, 10x10 map, middle layer tile at column 2, row 3
        fn new() -> Self {
            let tileset = Tileset::new("Ground".to_string(), "ground.png".to_string(), 32, 32, 4, 4);
            let mut map = TileMap::new(tileset.id, 10, 10);
            map.set_tile(1, 2, 3, Some(0));
            Self { map, tileset }
        }

        fn view(&self) -> TileMapView<'_> {
            TileMapView::new(
                Some(&self.map),
                Some(&self.tileset),
                MapOffset::for_tileset([0.0, 0.0], &self.tileset),
            )
        }
    }

    fn object(x: f32, y: f32, w: f32, h: f32) -> ObjectBounds {
        ObjectBounds::new([x, y], [w, h])
    }

    #[test]
    fn test_object_inside_solid_tile() {
        let fixture = Fixture::new();
        let objects = [object(64.0, 96.0, 16.0, 16.0)];
        assert!(test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &objects, false));
    }

    #[test]
    fn test_object_disjoint_from_tile() {
        let fixture = Fixture::new();
        let objects = [object(0.0, 0.0, 16.0, 16.0), object(97.0, 96.0, 10.0, 10.0)];
        assert!(!test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &objects, false));
    }

    #[test]
    fn test_touching_edge_collides() {
        let fixture = Fixture::new();
        // Right edge of the object at x = 64, the tile's left edge
        let objects = [object(48.0, 100.0, 16.0, 8.0)];
        assert!(test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &objects, false));
    }

    #[test]
    fn test_any_object_is_enough() {
        let fixture = Fixture::new();
        let objects = [object(0.0, 0.0, 4.0, 4.0), object(90.0, 120.0, 4.0, 4.0)];
        assert!(test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &objects, false));
        assert_eq!(colliding_objects(&fixture.view(), 1, 2.0, 3.0, &objects), vec![1]);
    }

    #[test]
    fn test_fractional_coordinates_are_floored() {
        let fixture = Fixture::new();
        let objects = [object(64.0, 96.0, 16.0, 16.0)];
        assert!(test_tile_collision(&fixture.view(), 1, 2.9, 3.5, &objects, false));
        assert!(!test_tile_collision(&fixture.view(), 1, 1.99, 3.0, &objects, false));
    }

    #[test]
    fn test_invalid_layer_is_false_then_inverted() {
        let fixture = Fixture::new();
        let objects = [object(64.0, 96.0, 16.0, 16.0)];
        for layer in [-1, 3, 42, i64::MIN, i64::MAX] {
            assert!(!test_tile_collision(&fixture.view(), layer, 2.0, 3.0, &objects, false));
            assert!(test_tile_collision(&fixture.view(), layer, 2.0, 3.0, &objects, true));
        }
    }

    #[test]
    fn test_out_of_range_and_non_finite_cells() {
        let fixture = Fixture::new();
        let objects = [object(-1000.0, -1000.0, 5000.0, 5000.0)];
        for (column, row) in [(-1.0, 0.0), (10.0, 0.0), (0.0, 10.0), (f64::NAN, 0.0), (0.0, f64::INFINITY)] {
            assert!(!test_tile_collision(&fixture.view(), 1, column, row, &objects, false));
        }
    }

    #[test]
    fn test_empty_cell_never_collides() {
        let fixture = Fixture::new();
        let everywhere = [object(-1000.0, -1000.0, 5000.0, 5000.0)];
        assert!(!test_tile_collision(&fixture.view(), 1, 5.0, 5.0, &everywhere, false));
        assert!(!test_tile_collision(&fixture.view(), 0, 2.0, 3.0, &everywhere, false));
    }

    #[test]
    fn test_non_collidable_tile() {
        let mut fixture = Fixture::new();
        fixture.tileset.set_tile_collision(0, CollisionShape::None);
        let objects = [object(64.0, 96.0, 16.0, 16.0)];
        assert!(!test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &objects, false));
    }

    #[test]
    fn test_tile_index_outside_tileset() {
        let mut fixture = Fixture::new();
        fixture.map.set_tile(1, 2, 3, Some(99));
        let objects = [object(64.0, 96.0, 16.0, 16.0)];
        assert!(!test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &objects, false));
    }

    #[test]
    fn test_missing_map_or_tileset() {
        let fixture = Fixture::new();
        let offset = MapOffset::new([0.0, 0.0], [32.0, 32.0]);
        let objects = [object(64.0, 96.0, 16.0, 16.0)];

        let no_map = TileMapView::new(None, Some(&fixture.tileset), offset);
        let no_tileset = TileMapView::new(Some(&fixture.map), None, offset);
        assert!(!test_tile_collision(&no_map, 1, 2.0, 3.0, &objects, false));
        assert!(!test_tile_collision(&no_tileset, 1, 2.0, 3.0, &objects, false));

        let other = Tileset::new("Other".to_string(), "other.png".to_string(), 32, 32, 4, 4);
        let mismatched = TileMapView::new(Some(&fixture.map), Some(&other), offset);
        assert!(!test_tile_collision(&mismatched, 1, 2.0, 3.0, &objects, false));
    }

    #[test]
    fn test_empty_object_list() {
        let fixture = Fixture::new();
        let objects: [ObjectBounds; 0] = [];
        assert!(!test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &objects, false));
        assert!(test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &objects, true));
    }

    #[test]
    fn test_inversion_law() {
        let fixture = Fixture::new();
        let cases = [
            (1, 2.0, 3.0, object(64.0, 96.0, 16.0, 16.0)),
            (1, 2.0, 3.0, object(200.0, 200.0, 4.0, 4.0)),
            (0, 2.0, 3.0, object(64.0, 96.0, 16.0, 16.0)),
            (5, 0.0, 0.0, object(0.0, 0.0, 16.0, 16.0)),
        ];
        for (layer, column, row, obj) in cases {
            let objects = [obj];
            let raw = test_tile_collision(&fixture.view(), layer, column, row, &objects, false);
            let inverted = test_tile_collision(&fixture.view(), layer, column, row, &objects, true);
            assert_eq!(inverted, !raw);
        }
    }

    #[test]
    fn test_map_offset_moves_tiles() {
        let fixture = Fixture::new();
        let view = TileMapView::new(
            Some(&fixture.map),
            Some(&fixture.tileset),
            MapOffset::new([100.0, 50.0], [32.0, 32.0]),
        );
        let at_origin = [object(64.0, 96.0, 16.0, 16.0)];
        let shifted = [object(164.0, 146.0, 16.0, 16.0)];
        assert!(!test_tile_collision(&view, 1, 2.0, 3.0, &at_origin, false));
        assert!(test_tile_collision(&view, 1, 2.0, 3.0, &shifted, false));
    }

    #[test]
    fn test_partial_mask() {
        let mut fixture = Fixture::new();
        // Only the bottom half of the tile is solid
        fixture
            .tileset
            .set_tile_collision(0, CollisionShape::rectangle([0.0, 0.5], [1.0, 0.5]));
        let top = [object(70.0, 98.0, 8.0, 8.0)];
        let bottom = [object(70.0, 118.0, 8.0, 8.0)];
        assert!(!test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &top, false));
        assert!(test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &bottom, false));
    }

    #[test]
    fn test_slope_mask() {
        let mut fixture = Fixture::new();
        // Bottom-right half of the cell is solid
        fixture.tileset.set_tile_collision(
            0,
            CollisionShape::polygon(vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]),
        );
        let above_slope = [object(66.0, 98.0, 4.0, 4.0)];
        let below_slope = [object(88.0, 120.0, 4.0, 4.0)];
        // The second object is a point on the diagonal, at the cell center
        let on_slope = [object(76.0, 76.0, 4.0, 4.0), object(80.0, 112.0, 0.0, 0.0)];

        assert!(!test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &above_slope, false));
        assert!(test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &above_slope, true));
        assert!(test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &below_slope, false));
        assert!(test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &on_slope, false));
        assert_eq!(
            colliding_objects(&fixture.view(), 1, 2.0, 3.0, &on_slope),
            vec![1]
        );

        // The mask follows the map offset
        let view = TileMapView::new(
            Some(&fixture.map),
            Some(&fixture.tileset),
            MapOffset::new([100.0, 0.0], [32.0, 32.0]),
        );
        assert!(!test_tile_collision(&view, 1, 2.0, 3.0, &below_slope, false));
        assert!(test_tile_collision(&view, 1, 2.0, 3.0, &[object(188.0, 120.0, 4.0, 4.0)], false));
    }

    #[test]
    fn test_trait_objects() {
        let fixture = Fixture::new();
        let rect = Rect::from_position_size([80.0, 100.0], [4.0, 4.0]);
        let bounds = object(0.0, 0.0, 1.0, 1.0);
        let objects: Vec<&dyn CollidableObject> = vec![&bounds, &rect];
        assert!(test_tile_collision(&fixture.view(), 1, 2.0, 3.0, &objects, false));
    }
}
