//! Declaration of the tile map object extension

use gd_extension::{ExtensionLibrary, ParameterType, PlatformExtension};

use crate::object::create_runtime_tile_map_object;

pub const EXTENSION_NAME: &str = "TileMapObject";

const INCLUDE_FILE: &str = "TileMapObject/RuntimeTileMapObject.h";
const EXPRESSION_ICON: &str = "res/TileMapIcon16.png";

/// Declare the tile map object, its size conditions and expressions, and the
/// tile collision condition.
pub fn declare_tile_map_object_extension(extension: &mut PlatformExtension) {
    extension.set_extension_information(
        EXTENSION_NAME,
        "Tile Map Object",
        "Extension allowing to use tile map objects.",
        "Victor Levasseur and Florian Rival",
        "zlib/libpng License (Open Source)",
    );

    let obj = extension.add_object(
        "TileMap",
        "Tile Map",
        "Displays a tile map",
        "CppPlatform/Extensions/TileMapIcon.png",
    );
    obj.set_include_file(INCLUDE_FILE);

    obj.add_condition(
        "Width",
        "Width",
        "Test the width of a Tile Map Object.",
        "The width of _PARAM0_ is _PARAM1__PARAM2_",
        "Size",
        "res/conditions/scaleWidth24.png",
        "res/conditions/scaleWidth.png",
    )
    .add_parameter(ParameterType::Object, "Object", "TileMap", false)
    .add_parameter(ParameterType::RelationalOperator, "Sign of the test", "", false)
    .add_parameter(ParameterType::Expression, "Value to test", "", false)
    .mark_as_advanced()
    .set_function_name("GetWidth")
    .set_manipulated_type("number")
    .set_include_file(INCLUDE_FILE);

    obj.add_condition(
        "Height",
        "Height",
        "Test the height of a Tile Map Object.",
        "The height of _PARAM0_ is _PARAM1__PARAM2_",
        "Size",
        "res/conditions/scaleHeight24.png",
        "res/conditions/scaleHeight.png",
    )
    .add_parameter(ParameterType::Object, "Object", "TileMap", false)
    .add_parameter(ParameterType::RelationalOperator, "Sign of the test", "", false)
    .add_parameter(ParameterType::Expression, "Value to test", "", false)
    .mark_as_advanced()
    .set_function_name("GetHeight")
    .set_manipulated_type("number")
    .set_include_file(INCLUDE_FILE);

    for (name, full_name, group, getter) in [
        ("TileWidth", "Tile width", "Tiles", "GetTileWidth"),
        ("TileHeight", "Tile height", "Tiles", "GetTileHeight"),
        ("MapWidth", "Map width (tiles)", "Map", "GetMapWidth"),
        ("MapHeight", "Map height (tiles)", "Map", "GetMapHeight"),
    ] {
        let description = full_name.split(" (").next().unwrap_or(full_name);
        obj.add_expression(name, full_name, description, group, EXPRESSION_ICON)
            .add_parameter(ParameterType::Object, "Object", "TileMap", false)
            .set_function_name(getter)
            .set_include_file(INCLUDE_FILE);
    }

    extension
        .add_condition(
            "SingleTileCollision",
            "Collision with one tile",
            "Test if an object collides a specific tile.",
            "_PARAM4_ is in collision with the tile at _PARAM2_;_PARAM3_ (layer _PARAM1_) of _PARAM0_",
            "Collisions",
            "res/conditions/collision24.png",
            "res/conditions/collision.png",
        )
        .add_parameter(ParameterType::ObjectList, "Tile Map Object", "TileMap", false)
        .add_parameter(
            ParameterType::Expression,
            "Tile layer (0: Back, 1: Middle, 2: Top)",
            "",
            false,
        )
        .add_parameter(ParameterType::Expression, "Tile column", "", false)
        .add_parameter(ParameterType::Expression, "Tile row", "", false)
        .add_parameter(ParameterType::ObjectList, "Object", "", false)
        .add_code_only_parameter(ParameterType::ConditionInverted, "")
        .mark_as_simple()
        .set_function_name("SingleTileCollision")
        .set_include_file(INCLUDE_FILE);

    extension.add_runtime_object(
        "TileMap",
        "RuntimeTileMapObject",
        create_runtime_tile_map_object,
    );

    extension.complete_compilation_information();
}

/// Plugin entry point of the tile map object extension
#[derive(Debug, Default)]
pub struct TileMapObjectExtension;

impl ExtensionLibrary for TileMapObjectExtension {
    fn name(&self) -> &str {
        EXTENSION_NAME
    }

    fn declare(&self, extension: &mut PlatformExtension) {
        declare_tile_map_object_extension(extension);
    }
}
