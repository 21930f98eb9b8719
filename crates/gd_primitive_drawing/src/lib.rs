//! Primitive drawing extension
//!
//! Provides the `Drawer` object, which queues rectangles, circles and lines
//! with its current style for the host renderer, and a free action copying
//! an image onto another through the host's [`ImageStore`].

mod drawer;
mod extension;
pub mod images;

pub use drawer::{
    create_drawer_object, Color, DrawCommand, DrawerError, DrawerObject, ShapeStyle,
    DRAWER_TYPE,
};
pub use extension::{
    declare_primitive_drawing_extension, PrimitiveDrawingExtension, EXTENSION_NAME,
};
pub use images::{
    copy_image_on_another, try_copy_image_on_another, Image, ImageError, ImageStore,
};
