use std::path::PathBuf;

use bevy::prelude::*;
use gd_extension::{ExtensionManager, ExtensionRegistry};

use crate::load_configured_extensions;

/// Plugin that loads the built-in extensions and inserts the
/// [`ExtensionRegistry`] resource.
///
/// ```rust,ignore
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(ExtensionsPlugin::default())
///     .run();
/// ```
#[derive(Default)]
pub struct ExtensionsPlugin {
    /// Directory holding `extensions.toml` and `locales/`. Uses the platform
    /// config directory when unset.
    pub config_dir: Option<PathBuf>,
}

impl ExtensionsPlugin {
    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: Some(dir.into()),
        }
    }

    fn manager(&self) -> ExtensionManager {
        let result = match &self.config_dir {
            Some(dir) => {
                let mut manager = ExtensionManager::with_config_dir(dir.clone());
                manager.load_config().map(|_| manager)
            }
            None => ExtensionManager::from_default_config(),
        };
        result.unwrap_or_else(|e| {
            warn!("Failed to read extension configuration, loading all extensions: {}", e);
            ExtensionManager::default()
        })
    }
}

impl Plugin for ExtensionsPlugin {
    fn build(&self, app: &mut App) {
        let mut registry = ExtensionRegistry::default();
        load_configured_extensions(&self.manager(), &mut registry);
        app.insert_resource(registry);
    }
}
