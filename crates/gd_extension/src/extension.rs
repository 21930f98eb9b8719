//! The declaration target of an extension

use serde::Serialize;

use crate::metadata::{ExpressionMetadata, ExtensionInfo, InstructionMetadata, ObjectMetadata};
use crate::object::ObjectFactory;

/// Separator between extension name and contribution name in full names
pub const NAMESPACE_SEPARATOR: &str = "::";

/// How the extension was built, checked by the registry before loading
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CompilationInfo {
    /// Built without editor metadata
    pub runtime_only: bool,
    /// Version of the extension API the extension was built against
    pub api_version: String,
    /// Pointer width in bits of the build target
    pub pointer_width: u32,
    pub information_completed: bool,
}

impl CompilationInfo {
    /// Compilation info of the running host
    pub fn current() -> Self {
        Self {
            runtime_only: false,
            api_version: env!("CARGO_PKG_VERSION").to_string(),
            pointer_width: usize::BITS,
            information_completed: true,
        }
    }

    /// Two builds are compatible when pointer width and API major.minor match
    pub fn is_compatible_with(&self, host: &CompilationInfo) -> bool {
        self.information_completed
            && self.pointer_width == host.pointer_width
            && major_minor(&self.api_version) == major_minor(&host.api_version)
    }
}

fn major_minor(version: &str) -> (&str, &str) {
    let mut parts = version.split('.');
    (parts.next().unwrap_or(""), parts.next().unwrap_or(""))
}

/// A runtime object implementation bound to a declared object type
#[derive(Clone, Serialize)]
pub struct RuntimeObjectBinding {
    /// Declared object name (without the extension prefix)
    pub object_name: String,
    /// Name of the runtime implementation type
    pub runtime_name: String,
    #[serde(skip)]
    pub factory: ObjectFactory,
}

impl std::fmt::Debug for RuntimeObjectBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeObjectBinding")
            .field("object_name", &self.object_name)
            .field("runtime_name", &self.runtime_name)
            .finish_non_exhaustive()
    }
}

/// Everything an extension contributes
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlatformExtension {
    pub info: ExtensionInfo,
    pub objects: Vec<ObjectMetadata>,
    pub conditions: Vec<InstructionMetadata>,
    pub actions: Vec<InstructionMetadata>,
    pub expressions: Vec<ExpressionMetadata>,
    #[serde(skip)]
    pub runtime_objects: Vec<RuntimeObjectBinding>,
    pub compilation_info: CompilationInfo,
}

impl PlatformExtension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn set_extension_information(
        &mut self,
        name: &str,
        full_name: &str,
        description: &str,
        author: &str,
        license: &str,
    ) -> &mut Self {
        self.info = ExtensionInfo {
            name: name.to_string(),
            full_name: full_name.to_string(),
            description: description.to_string(),
            author: author.to_string(),
            license: license.to_string(),
        };
        self
    }

    /// Full name of a contribution of this extension, e.g. `TileMapObject::TileMap`
    pub fn full_name_of(&self, name: &str) -> String {
        format!("{}{}{}", self.info.name, NAMESPACE_SEPARATOR, name)
    }

    /// Declare an object type
    pub fn add_object(
        &mut self,
        name: &str,
        full_name: &str,
        description: &str,
        icon: &str,
    ) -> &mut ObjectMetadata {
        self.objects
            .push(ObjectMetadata::new(name, full_name, description, icon));
        let last = self.objects.len() - 1;
        &mut self.objects[last]
    }

    /// Declare a condition not scoped to an object
    pub fn add_condition(
        &mut self,
        name: &str,
        full_name: &str,
        description: &str,
        sentence: &str,
        group: &str,
        icon: &str,
        small_icon: &str,
    ) -> &mut InstructionMetadata {
        self.conditions.push(InstructionMetadata::new(
            name,
            full_name,
            description,
            sentence,
            group,
            icon,
            small_icon,
        ));
        let last = self.conditions.len() - 1;
        &mut self.conditions[last]
    }

    /// Declare an action not scoped to an object
    pub fn add_action(
        &mut self,
        name: &str,
        full_name: &str,
        description: &str,
        sentence: &str,
        group: &str,
        icon: &str,
        small_icon: &str,
    ) -> &mut InstructionMetadata {
        self.actions.push(InstructionMetadata::new(
            name,
            full_name,
            description,
            sentence,
            group,
            icon,
            small_icon,
        ));
        let last = self.actions.len() - 1;
        &mut self.actions[last]
    }

    /// Declare an expression not scoped to an object
    pub fn add_expression(
        &mut self,
        name: &str,
        full_name: &str,
        description: &str,
        group: &str,
        small_icon: &str,
    ) -> &mut ExpressionMetadata {
        self.expressions.push(ExpressionMetadata::new(
            name,
            full_name,
            description,
            group,
            small_icon,
        ));
        let last = self.expressions.len() - 1;
        &mut self.expressions[last]
    }

    /// Bind a runtime implementation to a declared object
    pub fn add_runtime_object(
        &mut self,
        object_name: &str,
        runtime_name: &str,
        factory: ObjectFactory,
    ) -> &mut Self {
        self.runtime_objects.push(RuntimeObjectBinding {
            object_name: object_name.to_string(),
            runtime_name: runtime_name.to_string(),
            factory,
        });
        self
    }

    /// Record how this extension was built. Must be called last in a declaration.
    pub fn complete_compilation_information(&mut self) -> &mut Self {
        self.compilation_info = CompilationInfo::current();
        self
    }

    pub fn object(&self, name: &str) -> Option<&ObjectMetadata> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn condition(&self, name: &str) -> Option<&InstructionMetadata> {
        self.conditions.iter().find(|c| c.name == name)
    }

    pub fn action(&self, name: &str) -> Option<&InstructionMetadata> {
        self.actions.iter().find(|a| a.name == name)
    }

    pub fn expression(&self, name: &str) -> Option<&ExpressionMetadata> {
        self.expressions.iter().find(|e| e.name == name)
    }

    /// All instructions, free and object-scoped
    pub fn all_instructions(&self) -> impl Iterator<Item = &InstructionMetadata> {
        self.conditions
            .iter()
            .chain(self.actions.iter())
            .chain(
                self.objects
                    .iter()
                    .flat_map(|o| o.conditions.iter().chain(o.actions.iter())),
            )
    }

    /// All expressions, free and object-scoped
    pub fn all_expressions(&self) -> impl Iterator<Item = &ExpressionMetadata> {
        self.expressions
            .iter()
            .chain(self.objects.iter().flat_map(|o| o.expressions.iter()))
    }
}
