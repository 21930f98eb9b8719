//! Conditions evaluated by the event system

use gd_extension::RelationalOperator;
use gd_tilemap_core::{test_tile_collision, CollidableObject};

use crate::RuntimeTileMapObject;

/// Check whether any of `objects` collides with the tile at
/// (`column`, `row`) of `layer` in any of `tile_maps`.
///
/// Layer, column and row come from event expressions and are floored. The
/// inversion is applied once to the combined answer, so an inverted
/// condition means "no tile map has this tile in collision with any object".
pub fn single_tile_collision<O: CollidableObject>(
    tile_maps: &[&RuntimeTileMapObject],
    layer: f64,
    column: f64,
    row: f64,
    objects: &[O],
    inverted: bool,
) -> bool {
    let colliding = layer_index(layer).is_some_and(|layer| {
        tile_maps
            .iter()
            .any(|map| test_tile_collision(&map.view(), layer, column, row, objects, false))
    });
    colliding != inverted
}

fn layer_index(layer: f64) -> Option<i64> {
    if !layer.is_finite() {
        tracing::debug!(layer, "non-finite tile layer");
        return None;
    }
    Some(layer.floor() as i64)
}

/// Compare the width in pixels of a tile map
pub fn width(object: &RuntimeTileMapObject, operator: RelationalOperator, value: f64) -> bool {
    operator.compare(object.get_width(), value)
}

/// Compare the height in pixels of a tile map
pub fn height(object: &RuntimeTileMapObject, operator: RelationalOperator, value: f64) -> bool {
    operator.compare(object.get_height(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gd_tilemap_core::{layer_index, CollisionShape, ObjectBounds, TileMapData, Tileset};

    /// 32x32 tiles, solid tile on the middle layer at column 2, row 3
    fn tile_map(position: [f32; 2]) -> RuntimeTileMapObject {
        let tileset = Tileset::new("Ground".to_string(), "ground.png".to_string(), 32, 32, 4, 4);
        let mut data = TileMapData::new(tileset, 10, 10);
        data.map
            .set_tile(layer_index::MIDDLE as i64, 2, 3, Some(0));
        let mut object = RuntimeTileMapObject::with_data("Map", data);
        object.set_position(position);
        object
    }

    #[test]
    fn collision_example() {
        let map = tile_map([0.0, 0.0]);
        let player = [ObjectBounds::new([64.0, 96.0], [16.0, 16.0])];

        assert!(single_tile_collision(&[&map], 1.0, 2.0, 3.0, &player, false));
        assert!(!single_tile_collision(&[&map], 1.0, 2.0, 3.0, &player, true));
    }

    #[test]
    fn layer_expression_is_floored() {
        let map = tile_map([0.0, 0.0]);
        let player = [ObjectBounds::new([64.0, 96.0], [16.0, 16.0])];

        assert!(single_tile_collision(&[&map], 1.7, 2.0, 3.0, &player, false));
        assert!(!single_tile_collision(&[&map], 0.9, 2.0, 3.0, &player, false));
        assert!(!single_tile_collision(&[&map], f64::NAN, 2.0, 3.0, &player, false));
        assert!(single_tile_collision(&[&map], f64::NAN, 2.0, 3.0, &player, true));
    }

    #[test]
    fn any_tile_map_in_the_list() {
        let far_away = tile_map([1000.0, 1000.0]);
        let here = tile_map([0.0, 0.0]);
        let player = [ObjectBounds::new([64.0, 96.0], [16.0, 16.0])];

        assert!(!single_tile_collision(&[&far_away], 1.0, 2.0, 3.0, &player, false));
        assert!(single_tile_collision(&[&far_away, &here], 1.0, 2.0, 3.0, &player, false));
        assert!(!single_tile_collision(&[&far_away, &here], 1.0, 2.0, 3.0, &player, true));
    }

    #[test]
    fn no_tile_maps_or_unloaded_map() {
        let unloaded = RuntimeTileMapObject::new("Empty");
        let player = [ObjectBounds::new([64.0, 96.0], [16.0, 16.0])];

        assert!(!single_tile_collision(&[], 1.0, 2.0, 3.0, &player, false));
        assert!(!single_tile_collision(&[&unloaded], 1.0, 2.0, 3.0, &player, false));
        assert!(single_tile_collision(&[&unloaded], 1.0, 2.0, 3.0, &player, true));
    }

    #[test]
    fn tile_maps_collide_with_other_tile_maps() {
        let mut map = tile_map([0.0, 0.0]);
        if let Some(data) = map.data_mut() {
            data.tileset
                .set_tile_collision(0, CollisionShape::rectangle([0.0, 0.0], [0.5, 0.5]));
        }
        // A second map covering the whole area acts as a big object
        let other = tile_map([0.0, 0.0]);
        assert!(single_tile_collision(&[&map], 1.0, 2.0, 3.0, &[&other], false));
    }

    #[test]
    fn size_conditions() {
        let map = tile_map([0.0, 0.0]);

        assert!(width(&map, RelationalOperator::Equal, 320.0));
        assert!(width(&map, RelationalOperator::Greater, 100.0));
        assert!(!height(&map, RelationalOperator::Less, 320.0));
        assert!(height(&map, RelationalOperator::LessOrEqual, 320.0));
    }
}
