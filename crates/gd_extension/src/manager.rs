use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::library::ExtensionLibrary;
use crate::locale::Catalog;
use crate::registry::ExtensionRegistry;
use crate::ExtensionError;

/// Name of the loader configuration file inside the config directory
pub const CONFIG_FILE: &str = "extensions.toml";

/// Loader configuration, deserialized from `extensions.toml`.
///
/// ```toml
/// disabled = ["PrimitiveDrawing"]
/// locale = "fr"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Extensions that must not be loaded
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Locale used to translate display strings
    #[serde(default)]
    pub locale: Option<String>,
}

impl LoaderConfig {
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|d| d == name)
    }
}

/// Reads the loader configuration and loads libraries into a registry.
#[derive(Debug, Default)]
pub struct ExtensionManager {
    config_dir: Option<PathBuf>,
    config: LoaderConfig,
    catalog: Option<Catalog>,
}

impl ExtensionManager {
    /// Create a manager using the platform default config directory.
    ///
    /// Searches in order:
    /// 1. `$XDG_CONFIG_HOME/gd_extensions/` (Linux)
    /// 2. Platform-specific config directories
    /// 3. `.gd_extensions/` fallback in the current directory
    pub fn from_default_config() -> Result<Self, ExtensionError> {
        let mut manager = Self::with_config_dir(Self::find_config_dir());
        manager.load_config()?;
        Ok(manager)
    }

    /// Create a manager reading its configuration from `dir`
    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        ExtensionManager {
            config_dir: Some(dir.into()),
            config: LoaderConfig::default(),
            catalog: None,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// Ensure the config directory exists.
    pub fn sync_config_dir(&mut self) -> Result<(), ExtensionError> {
        if let Some(ref dir) = self.config_dir {
            if !dir.exists() {
                std::fs::create_dir_all(dir.join("locales"))?;
            }
        }
        Ok(())
    }

    /// Read `extensions.toml` and the catalog of the configured locale.
    ///
    /// Missing files leave the defaults in place.
    pub fn load_config(&mut self) -> Result<(), ExtensionError> {
        self.config = LoaderConfig::default();
        self.catalog = None;

        let Some(ref dir) = self.config_dir else {
            return Ok(());
        };

        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            self.config = toml::from_str(&content)?;
        }

        if let Some(locale) = &self.config.locale {
            let catalog_path = dir.join("locales").join(format!("{locale}.toml"));
            if catalog_path.exists() {
                self.catalog = Some(Catalog::load(&catalog_path)?);
            } else {
                tracing::warn!(
                    locale = %locale,
                    path = %catalog_path.display(),
                    "no catalog for configured locale, using untranslated strings"
                );
            }
        }

        Ok(())
    }

    /// Load every enabled library into `registry`.
    ///
    /// A library that fails to load is skipped and reported, so one broken
    /// extension does not prevent the others from loading. Returns the names
    /// of the extensions that were loaded.
    pub fn load_libraries(
        &self,
        registry: &mut ExtensionRegistry,
        libraries: Vec<Box<dyn ExtensionLibrary>>,
    ) -> Vec<String> {
        let mut loaded = Vec::new();
        for library in libraries {
            let name = library.name().to_string();
            if self.config.is_disabled(&name) {
                tracing::info!(extension = %name, "extension disabled by configuration");
                continue;
            }
            match registry.load_localized(library, self.catalog.as_ref()) {
                Ok(()) => loaded.push(name),
                Err(e) => tracing::error!(extension = %name, error = %e, "failed to load extension"),
            }
        }
        loaded
    }

    fn find_config_dir() -> PathBuf {
        // Try XDG_CONFIG_HOME first (Linux)
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("gd_extensions");
        }

        #[cfg(target_os = "linux")]
        {
            if let Ok(home) = std::env::var("HOME") {
                return PathBuf::from(home).join(".config/gd_extensions");
            }
        }

        #[cfg(target_os = "macos")]
        {
            if let Ok(home) = std::env::var("HOME") {
                return PathBuf::from(home).join("Library/Application Support/gd_extensions");
            }
        }

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                return PathBuf::from(appdata).join("gd_extensions");
            }
        }

        // Fallback to local directory
        PathBuf::from(".gd_extensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::PlatformExtension;

    struct Named(&'static str);

    impl ExtensionLibrary for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn declare(&self, extension: &mut PlatformExtension) {
            extension.set_extension_information(self.0, "Sample extension", "", "", "");
            extension.complete_compilation_information();
        }
    }

    struct Broken;

    impl ExtensionLibrary for Broken {
        fn name(&self) -> &str {
            "Broken"
        }

        fn declare(&self, extension: &mut PlatformExtension) {
            // Forgets the compilation information
            extension.set_extension_information("Broken", "Broken", "", "", "");
        }
    }

    #[test]
    fn default_manager_has_default_config() {
        let manager = ExtensionManager::default();
        assert_eq!(manager.config(), &LoaderConfig::default());
        assert!(manager.catalog().is_none());
    }

    #[test]
    fn load_config_from_temp_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("locales")).unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
disabled = ["Second"]
locale = "fr"
"#,
        )
        .unwrap();
        std::fs::write(
            tmp.path().join("locales/fr.toml"),
            "[strings]\n\"Sample extension\" = \"Extension d'exemple\"\n",
        )
        .unwrap();

        let mut manager = ExtensionManager::with_config_dir(tmp.path());
        manager.load_config().unwrap();
        assert!(manager.config().is_disabled("Second"));
        assert_eq!(manager.catalog().unwrap().locale, "fr");

        let libraries: Vec<Box<dyn ExtensionLibrary>> = vec![
            Box::new(Named("First")),
            Box::new(Named("Second")),
            Box::new(Broken),
        ];
        let mut registry = ExtensionRegistry::default();
        let loaded = manager.load_libraries(&mut registry, libraries);

        assert_eq!(loaded, vec!["First"]);
        assert!(!registry.is_loaded("Second"));
        assert!(!registry.is_loaded("Broken"));
        assert_eq!(
            registry.extension("First").unwrap().info.full_name,
            "Extension d'exemple"
        );
    }

    #[test]
    fn missing_catalog_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "locale = \"es\"\n").unwrap();

        let mut manager = ExtensionManager::with_config_dir(tmp.path());
        manager.load_config().unwrap();
        assert_eq!(manager.config().locale.as_deref(), Some("es"));
        assert!(manager.catalog().is_none());
    }

    #[test]
    fn invalid_config_is_a_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "disabled = 12\n").unwrap();

        let mut manager = ExtensionManager::with_config_dir(tmp.path());
        assert!(matches!(
            manager.load_config(),
            Err(ExtensionError::ParseError(_))
        ));
    }

    #[test]
    fn sync_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nonexistent/gd_extensions");

        let mut manager = ExtensionManager::with_config_dir(&dir);
        assert!(!dir.exists());
        manager.sync_config_dir().unwrap();
        assert!(dir.join("locales").exists());
    }

    #[test]
    fn load_with_no_dir_is_ok() {
        let mut manager = ExtensionManager::default();
        assert!(manager.load_config().is_ok());
    }
}
