pub use crate::extension::PlatformExtension;
pub use crate::library::ExtensionLibrary;
pub use crate::manager::ExtensionManager;
pub use crate::metadata::ParameterType;
pub use crate::object::{ObjectFactory, RuntimeObject};
pub use crate::operators::{Operator, RelationalOperator};
pub use crate::registry::ExtensionRegistry;
pub use crate::ExtensionError;
