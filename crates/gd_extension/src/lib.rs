//! Extension system for the game engine
//!
//! Extensions describe what they contribute (objects, actions, conditions,
//! expressions) with typed metadata, and are loaded through the
//! [`ExtensionLibrary`] plugin interface into an [`ExtensionRegistry`] that
//! the editor and the event compiler query.

pub mod extension;
pub mod library;
pub mod locale;
pub mod manager;
pub mod metadata;
pub mod object;
pub mod operators;
pub mod prelude;
pub mod registry;
pub mod validate;

pub use extension::{CompilationInfo, PlatformExtension, RuntimeObjectBinding};
pub use library::ExtensionLibrary;
pub use locale::Catalog;
pub use manager::{ExtensionManager, LoaderConfig};
pub use metadata::{
    CodeInfo, ExpressionMetadata, ExtensionInfo, InstructionMetadata, ObjectMetadata,
    ParameterMetadata, ParameterType, Visibility,
};
pub use object::{ObjectFactory, RuntimeObject};
pub use operators::{Operator, RelationalOperator};
pub use registry::ExtensionRegistry;

use thiserror::Error;

/// Errors that can occur while loading or querying extensions.
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Extension '{0}' is already loaded")]
    DuplicateExtension(String),
    #[error("Incompatible extension: {0}")]
    Incompatible(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<std::io::Error> for ExtensionError {
    fn from(err: std::io::Error) -> Self {
        ExtensionError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for ExtensionError {
    fn from(err: toml::de::Error) -> Self {
        ExtensionError::ParseError(err.to_string())
    }
}

impl From<serde_json::Error> for ExtensionError {
    fn from(err: serde_json::Error) -> Self {
        ExtensionError::ParseError(err.to_string())
    }
}
