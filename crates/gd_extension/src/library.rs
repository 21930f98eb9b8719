//! Plugin interface implemented by every extension

use crate::extension::PlatformExtension;

/// An extension the host can load
///
/// The registry creates an empty [`PlatformExtension`], hands it to
/// [`declare`](ExtensionLibrary::declare), validates the result and keeps the
/// library alive until the extension is unloaded.
///
/// ```
/// use gd_extension::{ExtensionLibrary, ExtensionRegistry, ParameterType, PlatformExtension};
///
/// struct Greeter;
///
/// impl ExtensionLibrary for Greeter {
///     fn name(&self) -> &str {
///         "Greeter"
///     }
///
///     fn declare(&self, extension: &mut PlatformExtension) {
///         extension.set_extension_information("Greeter", "Greeter", "Says hello", "Me", "MIT");
///         extension
///             .add_action("Hello", "Hello", "Greets", "Say hello to _PARAM0_", "Text", "", "")
///             .add_parameter(ParameterType::String, "Name", "", false)
///             .set_function_name("SayHello");
///         extension.complete_compilation_information();
///     }
/// }
///
/// let mut registry = ExtensionRegistry::default();
/// registry.load(Box::new(Greeter)).unwrap();
/// assert!(registry.action("Greeter::Hello").is_some());
/// ```
pub trait ExtensionLibrary: Send + Sync {
    /// Name of the extension this library declares
    fn name(&self) -> &str;

    /// Declare everything the extension contains: objects, actions,
    /// conditions, expressions and runtime objects.
    fn declare(&self, extension: &mut PlatformExtension);

    /// Called when the extension is removed from the registry
    fn on_unload(&self) {}
}
