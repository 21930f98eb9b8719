use crate::extension::{CompilationInfo, PlatformExtension, NAMESPACE_SEPARATOR};
use crate::library::ExtensionLibrary;
use crate::locale::Catalog;
use crate::metadata::{ExpressionMetadata, InstructionMetadata, ObjectMetadata};
use crate::object::RuntimeObject;
use crate::validate::validate_extension;
use crate::ExtensionError;

struct LoadedExtension {
    extension: PlatformExtension,
    library: Box<dyn ExtensionLibrary>,
}

impl std::fmt::Debug for LoadedExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedExtension")
            .field("extension", &self.extension.info.name)
            .field("library", &self.library.name())
            .finish()
    }
}

/// Registry of all loaded extensions and their contributions.
///
/// When the `bevy` feature is enabled, this type derives `bevy::prelude::Resource`
/// so it can be inserted into a Bevy `App`.
#[derive(Debug, Default)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct ExtensionRegistry {
    extensions: Vec<LoadedExtension>,
}

impl ExtensionRegistry {
    /// Declare, validate and register an extension.
    pub fn load(&mut self, library: Box<dyn ExtensionLibrary>) -> Result<(), ExtensionError> {
        self.load_localized(library, None)
    }

    /// Like [`load`](Self::load), translating display strings with `catalog`.
    pub fn load_localized(
        &mut self,
        library: Box<dyn ExtensionLibrary>,
        catalog: Option<&Catalog>,
    ) -> Result<(), ExtensionError> {
        let mut extension = PlatformExtension::new();
        library.declare(&mut extension);

        if extension.name() != library.name() {
            return Err(ExtensionError::ValidationError(format!(
                "library '{}' declared an extension named '{}'",
                library.name(),
                extension.name()
            )));
        }
        if self.is_loaded(extension.name()) {
            return Err(ExtensionError::DuplicateExtension(
                extension.name().to_string(),
            ));
        }

        let host = CompilationInfo::current();
        if !extension.compilation_info.is_compatible_with(&host) {
            return Err(ExtensionError::Incompatible(format!(
                "{}: built for API {} ({} bit, completed: {}), host is API {} ({} bit)",
                extension.name(),
                extension.compilation_info.api_version,
                extension.compilation_info.pointer_width,
                extension.compilation_info.information_completed,
                host.api_version,
                host.pointer_width
            )));
        }

        validate_extension(&extension)?;

        if let Some(catalog) = catalog {
            catalog.localize(&mut extension);
        }

        tracing::info!(
            extension = extension.name(),
            objects = extension.objects.len(),
            instructions = extension.all_instructions().count(),
            expressions = extension.all_expressions().count(),
            "loaded extension"
        );
        self.extensions.push(LoadedExtension { extension, library });
        Ok(())
    }

    /// Remove an extension, notifying its library.
    pub fn unload(&mut self, name: &str) -> Result<(), ExtensionError> {
        let pos = self
            .extensions
            .iter()
            .position(|e| e.extension.name() == name)
            .ok_or_else(|| ExtensionError::NotFound(format!("extension '{name}'")))?;
        let loaded = self.extensions.remove(pos);
        loaded.library.on_unload();
        tracing::info!(extension = name, "unloaded extension");
        Ok(())
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.extension(name).is_some()
    }

    pub fn extension(&self, name: &str) -> Option<&PlatformExtension> {
        self.extensions
            .iter()
            .map(|e| &e.extension)
            .find(|e| e.name() == name)
    }

    /// Iterate over loaded extensions in load order
    pub fn extensions(&self) -> impl Iterator<Item = &PlatformExtension> {
        self.extensions.iter().map(|e| &e.extension)
    }

    /// Split `Extension::Name` and resolve the extension
    fn resolve<'a, 'b>(&'a self, full_name: &'b str) -> Option<(&'a PlatformExtension, &'b str)> {
        let (extension, name) = full_name.split_once(NAMESPACE_SEPARATOR)?;
        Some((self.extension(extension)?, name))
    }

    /// Object metadata by full type name, e.g. `TileMapObject::TileMap`
    pub fn object(&self, full_type: &str) -> Option<&ObjectMetadata> {
        let (extension, name) = self.resolve(full_type)?;
        extension.object(name)
    }

    /// Condition by full name. Free conditions take precedence over object ones.
    pub fn condition(&self, full_name: &str) -> Option<&InstructionMetadata> {
        let (extension, name) = self.resolve(full_name)?;
        extension
            .condition(name)
            .or_else(|| extension.objects.iter().find_map(|o| o.condition(name)))
    }

    /// Action by full name. Free actions take precedence over object ones.
    pub fn action(&self, full_name: &str) -> Option<&InstructionMetadata> {
        let (extension, name) = self.resolve(full_name)?;
        extension
            .action(name)
            .or_else(|| extension.objects.iter().find_map(|o| o.action(name)))
    }

    /// Expression by full name. Free expressions take precedence over object ones.
    pub fn expression(&self, full_name: &str) -> Option<&ExpressionMetadata> {
        let (extension, name) = self.resolve(full_name)?;
        extension
            .expression(name)
            .or_else(|| extension.objects.iter().find_map(|o| o.expression(name)))
    }

    /// Full type names of every declared object
    pub fn object_types(&self) -> Vec<String> {
        self.extensions()
            .flat_map(|e| e.objects.iter().map(move |o| e.full_name_of(&o.name)))
            .collect()
    }

    /// Every include file the event compiler needs, sorted and deduplicated
    pub fn include_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for extension in self.extensions() {
            let objects = extension.objects.iter().map(|o| o.include_file.as_str());
            let instructions = extension
                .all_instructions()
                .map(|i| i.code.include_file.as_str());
            let expressions = extension
                .all_expressions()
                .map(|e| e.code.include_file.as_str());
            files.extend(objects.chain(instructions).chain(expressions));
        }
        files.retain(|f| !f.is_empty());
        files.sort_unstable();
        files.dedup();
        files
    }

    /// Create a runtime object through the factory bound to `full_type`
    pub fn create_object(
        &self,
        full_type: &str,
        instance_name: &str,
    ) -> Result<Box<dyn RuntimeObject>, ExtensionError> {
        let (extension, name) = self
            .resolve(full_type)
            .ok_or_else(|| ExtensionError::NotFound(format!("object type '{full_type}'")))?;
        let binding = extension
            .runtime_objects
            .iter()
            .find(|b| b.object_name == name)
            .ok_or_else(|| {
                ExtensionError::NotFound(format!("runtime object for '{full_type}'"))
            })?;
        Ok((binding.factory)(instance_name))
    }

    /// Export all metadata as JSON, for the editor
    pub fn export_json(&self) -> Result<String, ExtensionError> {
        let extensions: Vec<&PlatformExtension> = self.extensions().collect();
        Ok(serde_json::to_string_pretty(&extensions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ParameterType;
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Lamp {
        name: String,
    }

    impl RuntimeObject for Lamp {
        fn name(&self) -> &str {
            &self.name
        }

        fn object_type(&self) -> &str {
            "Lights::Lamp"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn create_lamp(name: &str) -> Box<dyn RuntimeObject> {
        Box::new(Lamp {
            name: name.to_string(),
        })
    }

    #[derive(Default)]
    struct Lights {
        unloads: Arc<AtomicUsize>,
        skip_compilation_info: bool,
    }

    impl ExtensionLibrary for Lights {
        fn name(&self) -> &str {
            "Lights"
        }

        fn declare(&self, extension: &mut PlatformExtension) {
            extension.set_extension_information("Lights", "Lights", "Light sources", "Test", "MIT");

            let lamp = extension.add_object("Lamp", "Lamp", "A lamp", "lamp.png");
            lamp.set_include_file("Lights/Lamp.h");
            lamp.add_action(
                "Intensity",
                "Intensity",
                "Change the intensity",
                "Do _PARAM2__PARAM1_ to the intensity of _PARAM0_",
                "Light",
                "res/light24.png",
                "res/light.png",
            )
            .add_parameter(ParameterType::Object, "Object", "Lamp", false)
            .add_parameter(ParameterType::Expression, "Value", "", false)
            .add_parameter(ParameterType::Operator, "Modification's sign", "", false)
            .set_function_name("SetIntensity")
            .set_include_file("Lights/Lamp.h");
            lamp.add_expression("Intensity", "Intensity", "Intensity", "Light", "res/light.png")
                .add_parameter(ParameterType::Object, "Object", "Lamp", false)
                .set_function_name("GetIntensity");

            extension
                .add_condition(
                    "AnyLit",
                    "Any lamp lit",
                    "Check if a lamp is lit",
                    "_PARAM0_ is lit",
                    "Light",
                    "",
                    "",
                )
                .add_parameter(ParameterType::ObjectList, "Lamp", "Lamp", false)
                .add_code_only_parameter(ParameterType::ConditionInverted, "")
                .set_function_name("AnyLit")
                .set_include_file("Lights/Functions.h");

            extension.add_runtime_object("Lamp", "RuntimeLamp", create_lamp);

            if !self.skip_compilation_info {
                extension.complete_compilation_information();
            }
        }

        fn on_unload(&self) {
            self.unloads.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn load_and_query() {
        let mut registry = ExtensionRegistry::default();
        registry.load(Box::new(Lights::default())).unwrap();

        assert!(registry.is_loaded("Lights"));
        assert!(registry.object("Lights::Lamp").is_some());
        assert!(registry.action("Lights::Intensity").is_some());
        assert!(registry.expression("Lights::Intensity").is_some());
        assert!(registry.condition("Lights::AnyLit").unwrap().is_invertible());
        assert!(registry.condition("Lights::Intensity").is_none());
        assert!(registry.object("Lamp").is_none());
        assert!(registry.object("Other::Lamp").is_none());
        assert_eq!(registry.object_types(), vec!["Lights::Lamp"]);
    }

    #[test]
    fn lookups_outlive_the_queried_name() {
        let mut registry = ExtensionRegistry::default();
        registry.load(Box::new(Lights::default())).unwrap();

        let lamp = {
            let full_type = format!("Lights{NAMESPACE_SEPARATOR}Lamp");
            registry.object(&full_type)
        };
        let intensity = {
            let full_name = String::from("Lights::Intensity");
            (registry.action(&full_name), registry.expression(&full_name))
        };
        let any_lit = {
            let full_name = String::from("Lights::AnyLit");
            registry.condition(&full_name)
        };

        assert_eq!(lamp.map(|o| o.name.as_str()), Some("Lamp"));
        assert!(intensity.0.is_some() && intensity.1.is_some());
        assert!(any_lit.is_some());
    }

    #[test]
    fn include_files_are_deduplicated() {
        let mut registry = ExtensionRegistry::default();
        registry.load(Box::new(Lights::default())).unwrap();

        assert_eq!(
            registry.include_files(),
            vec!["Lights/Functions.h", "Lights/Lamp.h"]
        );
    }

    #[test]
    fn duplicate_extension_is_rejected() {
        let mut registry = ExtensionRegistry::default();
        registry.load(Box::new(Lights::default())).unwrap();

        let err = registry.load(Box::new(Lights::default())).unwrap_err();
        assert!(matches!(err, ExtensionError::DuplicateExtension(name) if name == "Lights"));
        assert_eq!(registry.extensions().count(), 1);
    }

    #[test]
    fn incomplete_compilation_info_is_rejected() {
        let mut registry = ExtensionRegistry::default();
        let library = Lights {
            skip_compilation_info: true,
            ..Default::default()
        };

        let err = registry.load(Box::new(library)).unwrap_err();
        assert!(matches!(err, ExtensionError::Incompatible(_)));
        assert!(!registry.is_loaded("Lights"));
    }

    #[test]
    fn unload_notifies_library() {
        let unloads = Arc::new(AtomicUsize::new(0));
        let mut registry = ExtensionRegistry::default();
        registry
            .load(Box::new(Lights {
                unloads: unloads.clone(),
                ..Default::default()
            }))
            .unwrap();

        registry.unload("Lights").unwrap();
        assert_eq!(unloads.load(Ordering::SeqCst), 1);
        assert!(!registry.is_loaded("Lights"));
        assert!(matches!(
            registry.unload("Lights"),
            Err(ExtensionError::NotFound(_))
        ));
    }

    #[test]
    fn create_object_through_factory() {
        let mut registry = ExtensionRegistry::default();
        registry.load(Box::new(Lights::default())).unwrap();

        let mut object = registry.create_object("Lights::Lamp", "Lamp1").unwrap();
        assert_eq!(object.name(), "Lamp1");
        assert_eq!(object.object_type(), "Lights::Lamp");
        assert!(object.downcast_mut::<Lamp>().is_some());

        assert!(matches!(
            registry.create_object("Lights::Spot", "Spot1"),
            Err(ExtensionError::NotFound(_))
        ));
    }

    #[test]
    fn localized_load() {
        let catalog = Catalog::from_toml("[strings]\n\"Lamp\" = \"Lampe\"\n").unwrap();
        let mut registry = ExtensionRegistry::default();
        registry
            .load_localized(Box::new(Lights::default()), Some(&catalog))
            .unwrap();

        let lamp = registry.object("Lights::Lamp").unwrap();
        assert_eq!(lamp.full_name, "Lampe");
        assert_eq!(lamp.name, "Lamp");
    }

    #[test]
    fn export_json_lists_extensions() {
        let mut registry = ExtensionRegistry::default();
        registry.load(Box::new(Lights::default())).unwrap();

        let json: serde_json::Value = serde_json::from_str(&registry.export_json().unwrap()).unwrap();
        assert_eq!(json[0]["info"]["name"], "Lights");
        assert_eq!(json[0]["conditions"][0]["parameters"][0]["type"], "objectList");
    }
}
