//! Runtime objects created through extension factories

use std::any::Any;
use std::fmt::Debug;

/// An object instance living in a running scene
///
/// Extensions register a factory for each object type they declare; the host
/// creates instances by full type name and downcasts them to call the
/// extension's instructions. Instances are destroyed by dropping them.
pub trait RuntimeObject: Any + Debug + Send + Sync {
    /// Instance name, as chosen in the editor
    fn name(&self) -> &str;

    /// Full type name, e.g. `TileMapObject::TileMap`
    fn object_type(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn RuntimeObject {
    /// Downcast to a concrete object type
    pub fn downcast_ref<T: RuntimeObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: RuntimeObject>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Creates a runtime object given its instance name
pub type ObjectFactory = fn(name: &str) -> Box<dyn RuntimeObject>;
