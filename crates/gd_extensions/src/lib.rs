//! # gd_extensions
//!
//! Built-in extensions of the engine, ready to load into an
//! [`ExtensionRegistry`]:
//!
//! - `TileMapObject`: tile map objects and the `SingleTileCollision` condition
//! - `PrimitiveDrawing`: the shape painter object and image copy action
//!
//! ```
//! use gd_extensions::prelude::*;
//!
//! let mut registry = ExtensionRegistry::default();
//! gd_extensions::load_builtin_extensions(&mut registry).unwrap();
//! assert!(registry.condition("TileMapObject::SingleTileCollision").is_some());
//! ```
//!
//! ## Feature Flags
//!
//! - `bevy`: [`ExtensionsPlugin`], inserting the registry as a Bevy resource

pub use gd_extension as extension;
pub use gd_primitive_drawing as primitive_drawing;
pub use gd_tilemap_core as tilemap;
pub use gd_tilemap_object as tilemap_object;

#[cfg(feature = "bevy")]
mod plugin;

#[cfg(feature = "bevy")]
pub use plugin::ExtensionsPlugin;

use gd_extension::{ExtensionError, ExtensionLibrary, ExtensionManager, ExtensionRegistry};
use gd_primitive_drawing::PrimitiveDrawingExtension;
use gd_tilemap_object::TileMapObjectExtension;

pub mod prelude {
    pub use gd_extension::prelude::*;
    pub use gd_primitive_drawing::{DrawerObject, PrimitiveDrawingExtension};
    pub use gd_tilemap_core::{ObjectBounds, TileMapData, Tileset};
    pub use gd_tilemap_object::{single_tile_collision, RuntimeTileMapObject, TileMapObjectExtension};

    #[cfg(feature = "bevy")]
    pub use crate::ExtensionsPlugin;
}

/// Every extension shipped with the engine
pub fn builtin_libraries() -> Vec<Box<dyn ExtensionLibrary>> {
    vec![
        Box::new(TileMapObjectExtension),
        Box::new(PrimitiveDrawingExtension),
    ]
}

/// Load every built-in extension, stopping at the first failure
pub fn load_builtin_extensions(registry: &mut ExtensionRegistry) -> Result<(), ExtensionError> {
    for library in builtin_libraries() {
        registry.load(library)?;
    }
    Ok(())
}

/// Load the built-in extensions enabled by `manager`'s configuration,
/// translated with its locale. Returns the names of the loaded extensions.
pub fn load_configured_extensions(
    manager: &ExtensionManager,
    registry: &mut ExtensionRegistry,
) -> Vec<String> {
    let loaded = manager.load_libraries(registry, builtin_libraries());
    tracing::info!(count = loaded.len(), "built-in extensions loaded");
    loaded
}
