//! Declaration of the primitive drawing extension

use gd_extension::{
    ExtensionLibrary, InstructionMetadata, ObjectMetadata, ParameterType, PlatformExtension,
};

use crate::drawer::create_drawer_object;

pub const EXTENSION_NAME: &str = "PrimitiveDrawing";

const INCLUDE_FILE: &str = "PrimitiveDrawing/DrawerObject.h";

/// Declare the drawer object and the image copy action.
pub fn declare_primitive_drawing_extension(extension: &mut PlatformExtension) {
    extension.set_extension_information(
        EXTENSION_NAME,
        "Primitive drawing",
        "Extension allowing to draw shapes directly and manipulate images.",
        "Compil Games",
        "zlib/libpng License (Open Source)",
    );

    let obj = extension.add_object(
        "Drawer",
        "Shape painter",
        "Allows to draw simple shapes on the screen",
        "Extensions/primitivedrawingicon.png",
    );
    obj.set_include_file(INCLUDE_FILE);

    declare_shapes(obj);
    declare_style(obj);

    extension
        .add_action(
            "CopyImageOnAnother",
            "Copy an image on another",
            "Copy an image on another.\nNote that the source image must be preferably kept loaded in memory.",
            "Copy the image _PARAM1_ on _PARAM0_ at _PARAM2_;_PARAM3_",
            "Images",
            "res/actions/copy24.png",
            "res/actions/copy.png",
        )
        .add_parameter(ParameterType::String, "Name of the image to modify", "", false)
        .add_parameter(ParameterType::String, "Name of the source image", "", false)
        .add_parameter(ParameterType::Expression, "X position", "", false)
        .add_parameter(ParameterType::Expression, "Y position", "", false)
        .set_function_name("GDpriv::PrimitiveDrawingExtension::CopyImageOnAnother")
        .set_include_file(INCLUDE_FILE);

    extension.add_runtime_object("Drawer", "DrawerObject", create_drawer_object);

    extension.complete_compilation_information();
}

fn declare_shapes(obj: &mut ObjectMetadata) {
    obj.add_action(
        "Rectangle",
        "Rectangle",
        "Draw a rectangle on screen",
        "Draw from _PARAM1_;_PARAM2_ to _PARAM3_;_PARAM4_ a rectangle with _PARAM0_",
        "Drawing",
        "res/actions/rectangle24.png",
        "res/actions/rectangle.png",
    )
    .add_parameter(ParameterType::Object, "Shape Painter object", "Drawer", false)
    .add_parameter(ParameterType::Expression, "Top left side: X Position", "", false)
    .add_parameter(ParameterType::Expression, "Top left side : Y Position", "", false)
    .add_parameter(ParameterType::Expression, "Bottom right side : X Position", "", false)
    .add_parameter(ParameterType::Expression, "Bottom right side : Y Position", "", false)
    .set_function_name("DrawRectangle")
    .set_include_file(INCLUDE_FILE);

    obj.add_action(
        "Circle",
        "Circle",
        "Draw a circle on screen",
        "Draw at _PARAM1_;_PARAM2_ a circle of radius _PARAM3_ with _PARAM0_",
        "Drawing",
        "res/actions/circle24.png",
        "res/actions/circle.png",
    )
    .add_parameter(ParameterType::Object, "Shape Painter object", "Drawer", false)
    .add_parameter(ParameterType::Expression, "X position of center", "", false)
    .add_parameter(ParameterType::Expression, "Y position of center", "", false)
    .add_parameter(ParameterType::Expression, "Radius ( in pixels )", "", false)
    .set_function_name("DrawCircle")
    .set_include_file(INCLUDE_FILE);

    obj.add_action(
        "Line",
        "Line",
        "Draw a line on screen",
        "Draw from _PARAM1_;_PARAM2_ to _PARAM3_;_PARAM4_ a line (thickness: _PARAM5_) with _PARAM0_",
        "Drawing",
        "res/actions/line24.png",
        "res/actions/line.png",
    )
    .add_parameter(ParameterType::Object, "Shape Painter object", "Drawer", false)
    .add_parameter(ParameterType::Expression, "X Position of start point", "", false)
    .add_parameter(ParameterType::Expression, "Y Position of start point", "", false)
    .add_parameter(ParameterType::Expression, "X Position of end point", "", false)
    .add_parameter(ParameterType::Expression, "Y Position of end point", "", false)
    .add_parameter(ParameterType::Expression, "Thickness ( in pixels )", "", false)
    .set_function_name("DrawLine")
    .set_include_file(INCLUDE_FILE);
}

fn declare_style(obj: &mut ObjectMetadata) {
    obj.add_action(
        "FillColor",
        "Fill color",
        "Change the color used when filling",
        "Change fill color of _PARAM0_ to _PARAM1_",
        "Setup",
        "res/actions/text24.png",
        "res/actions/text.png",
    )
    .add_parameter(ParameterType::Object, "Shape Painter object", "Drawer", false)
    .add_parameter(ParameterType::Color, "Fill color", "", false)
    .set_function_name("SetFillColor")
    .set_include_file(INCLUDE_FILE);

    obj.add_action(
        "OutlineColor",
        "Outline color",
        "Modify the color of the outline of future drawings.",
        "Change outline color of _PARAM0_ to _PARAM1_",
        "Setup",
        "res/actions/color24.png",
        "res/actions/color.png",
    )
    .add_parameter(ParameterType::Object, "Object", "Drawer", false)
    .add_parameter(ParameterType::Color, "Color", "", false)
    .set_function_name("SetOutlineColor")
    .set_include_file(INCLUDE_FILE);

    number_property(
        obj,
        "OutlineSize",
        "Outline size",
        ("Modify the size of the outline of future drawings.", "Test the size of the outline."),
        ("Do _PARAM2__PARAM1_ to the size of the outline of _PARAM0_", "The size of the outline of _PARAM0_ is _PARAM2__PARAM1_"),
        "outlineSize",
        ("Size in pixels", "Size to test"),
        ("SetOutlineSize", "GetOutlineSize"),
    );
    number_property(
        obj,
        "FillOpacity",
        "Fill opacity",
        ("Modify the opacity level used when filling future drawings.", "Test the value of the opacity level used when filling."),
        ("Do _PARAM2__PARAM1_ to the opacity of filling of _PARAM0_", "The opacity of filling of _PARAM0_ is _PARAM2__PARAM1_"),
        "opacity",
        ("Value", "Value to test"),
        ("SetFillOpacity", "GetFillOpacity"),
    );
    number_property(
        obj,
        "OutlineOpacity",
        "Outline opacity",
        ("Modify the opacity of the outline of future drawings.", "Test the opacity of the outline."),
        ("Do _PARAM2__PARAM1_ to the opacity of the outline of _PARAM0_", "The opacity of the outline of _PARAM0_ is _PARAM2__PARAM1_"),
        "opacity",
        ("Value", "Value to test"),
        ("SetOutlineOpacity", "GetOutlineOpacity"),
    );
}

/// Declare the action modifying a numeric property and the condition testing
/// it. Pairs are (action, condition).
fn number_property(
    obj: &mut ObjectMetadata,
    name: &str,
    full_name: &str,
    descriptions: (&str, &str),
    sentences: (&str, &str),
    icon: &str,
    values: (&str, &str),
    (setter, getter): (&str, &str),
) {
    let action = obj.add_action(
        name,
        full_name,
        descriptions.0,
        sentences.0,
        "Setup",
        &format!("res/actions/{icon}24.png"),
        &format!("res/actions/{icon}.png"),
    );
    drawer_value(action, values.0, ParameterType::Operator, "Modification's sign")
        .set_function_name(setter)
        .set_associated_getter(getter);

    let condition = obj.add_condition(
        name,
        full_name,
        descriptions.1,
        sentences.1,
        "Setup",
        &format!("res/conditions/{icon}24.png"),
        &format!("res/conditions/{icon}.png"),
    );
    drawer_value(condition, values.1, ParameterType::RelationalOperator, "Sign of the test")
        .set_function_name(getter);
}

fn drawer_value<'a>(
    instruction: &'a mut InstructionMetadata,
    value: &str,
    operator: ParameterType,
    operator_description: &str,
) -> &'a mut InstructionMetadata {
    instruction
        .add_parameter(ParameterType::Object, "Object", "Drawer", false)
        .add_parameter(ParameterType::Expression, value, "", false)
        .add_parameter(operator, operator_description, "", false)
        .set_manipulated_type("number")
        .set_include_file(INCLUDE_FILE)
}

/// Plugin entry point of the primitive drawing extension
#[derive(Debug, Default)]
pub struct PrimitiveDrawingExtension;

impl ExtensionLibrary for PrimitiveDrawingExtension {
    fn name(&self) -> &str {
        EXTENSION_NAME
    }

    fn declare(&self, extension: &mut PlatformExtension) {
        declare_primitive_drawing_extension(extension);
    }
}
