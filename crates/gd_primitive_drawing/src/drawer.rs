//! Drawer object: queues primitive shapes for the host renderer

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use gd_extension::{Operator, RelationalOperator, RuntimeObject};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Full type name of the drawer object
pub const DRAWER_TYPE: &str = "PrimitiveDrawing::Drawer";

/// Errors raised by drawer object settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrawerError {
    #[error("Invalid color '{0}', expected \"R;G;B\"")]
    InvalidColor(String),
}

/// An opaque RGB color, written "R;G;B" in events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// RGBA array with the given opacity
    pub fn with_opacity(&self, opacity: u8) -> [u8; 4] {
        [self.r, self.g, self.b, opacity]
    }
}

impl FromStr for Color {
    type Err = DrawerError;

    /// Parse "R;G;B". Components are clamped to 0-255.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components: Vec<&str> = s.split(';').collect();
        if components.len() != 3 {
            return Err(DrawerError::InvalidColor(s.to_string()));
        }
        let mut rgb = [0u8; 3];
        for (channel, component) in rgb.iter_mut().zip(&components) {
            let value: i64 = component
                .trim()
                .parse()
                .map_err(|_| DrawerError::InvalidColor(s.to_string()))?;
            *channel = value.clamp(0, 255) as u8;
        }
        Ok(Color::new(rgb[0], rgb[1], rgb[2]))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{};{}", self.r, self.g, self.b)
    }
}

/// Style applied to the shapes drawn next
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    pub fill_color: Color,
    pub fill_opacity: u8,
    pub outline_color: Color,
    pub outline_opacity: u8,
    /// Outline thickness in pixels
    pub outline_size: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::WHITE,
            fill_opacity: 255,
            outline_color: Color::BLACK,
            outline_opacity: 255,
            outline_size: 1.0,
        }
    }
}

/// A shape waiting to be rendered, in world coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DrawCommand {
    Rectangle {
        top_left: [f32; 2],
        bottom_right: [f32; 2],
        style: ShapeStyle,
    },
    Circle {
        center: [f32; 2],
        radius: f32,
        style: ShapeStyle,
    },
    /// Lines are drawn with the fill color
    Line {
        start: [f32; 2],
        end: [f32; 2],
        thickness: f32,
        color: Color,
        opacity: u8,
    },
}

/// Object drawing shapes on screen
///
/// Each drawing action queues a [`DrawCommand`] using the current style; the
/// renderer drains the queue with [`take_commands`](DrawerObject::take_commands)
/// every frame.
#[derive(Debug, Clone)]
pub struct DrawerObject {
    name: String,
    position: [f32; 2],
    absolute_coordinates: bool,
    style: ShapeStyle,
    commands: Vec<DrawCommand>,
}

impl DrawerObject {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            position: [0.0, 0.0],
            absolute_coordinates: true,
            style: ShapeStyle::default(),
            commands: Vec::new(),
        }
    }

    pub fn with_style(name: &str, style: ShapeStyle) -> Self {
        Self {
            style,
            ..Self::new(name)
        }
    }

    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    pub fn set_position(&mut self, position: [f32; 2]) {
        self.position = position;
    }

    pub fn absolute_coordinates(&self) -> bool {
        self.absolute_coordinates
    }

    /// When disabled, shape coordinates are relative to the object position
    pub fn set_absolute_coordinates(&mut self, absolute: bool) {
        self.absolute_coordinates = absolute;
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the queued shapes
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn point(&self, x: f64, y: f64) -> Option<[f32; 2]> {
        if !x.is_finite() || !y.is_finite() {
            tracing::warn!(object = %self.name, x, y, "non-finite drawing coordinates");
            return None;
        }
        let [ox, oy] = if self.absolute_coordinates {
            [0.0, 0.0]
        } else {
            self.position
        };
        Some([x as f32 + ox, y as f32 + oy])
    }

    pub fn draw_rectangle(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let (Some(top_left), Some(bottom_right)) = (self.point(x1, y1), self.point(x2, y2)) else {
            return;
        };
        self.commands.push(DrawCommand::Rectangle {
            top_left,
            bottom_right,
            style: self.style,
        });
    }

    pub fn draw_circle(&mut self, x: f64, y: f64, radius: f64) {
        let Some(center) = self.point(x, y) else {
            return;
        };
        if !radius.is_finite() || radius < 0.0 {
            tracing::warn!(object = %self.name, radius, "invalid circle radius");
            return;
        }
        self.commands.push(DrawCommand::Circle {
            center,
            radius: radius as f32,
            style: self.style,
        });
    }

    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, thickness: f64) {
        let (Some(start), Some(end)) = (self.point(x1, y1), self.point(x2, y2)) else {
            return;
        };
        self.commands.push(DrawCommand::Line {
            start,
            end,
            thickness: non_negative(thickness) as f32,
            color: self.style.fill_color,
            opacity: self.style.fill_opacity,
        });
    }

    /// Set the fill color from an "R;G;B" string. Invalid colors are ignored.
    pub fn set_fill_color(&mut self, color: &str) {
        if let Some(color) = self.parse_color(color) {
            self.style.fill_color = color;
        }
    }

    /// Set the outline color from an "R;G;B" string. Invalid colors are ignored.
    pub fn set_outline_color(&mut self, color: &str) {
        if let Some(color) = self.parse_color(color) {
            self.style.outline_color = color;
        }
    }

    fn parse_color(&self, color: &str) -> Option<Color> {
        match color.parse() {
            Ok(color) => Some(color),
            Err(e) => {
                tracing::warn!(object = %self.name, error = %e, "color ignored");
                None
            }
        }
    }

    pub fn get_outline_size(&self) -> f64 {
        self.style.outline_size as f64
    }

    pub fn set_outline_size(&mut self, value: f64, operator: Operator) {
        let size = operator.apply(self.get_outline_size(), value);
        if size.is_finite() {
            self.style.outline_size = non_negative(size) as f32;
        }
    }

    pub fn get_fill_opacity(&self) -> f64 {
        self.style.fill_opacity as f64
    }

    pub fn set_fill_opacity(&mut self, value: f64, operator: Operator) {
        if let Some(opacity) = opacity(operator.apply(self.get_fill_opacity(), value)) {
            self.style.fill_opacity = opacity;
        }
    }

    pub fn get_outline_opacity(&self) -> f64 {
        self.style.outline_opacity as f64
    }

    pub fn set_outline_opacity(&mut self, value: f64, operator: Operator) {
        if let Some(opacity) = opacity(operator.apply(self.get_outline_opacity(), value)) {
            self.style.outline_opacity = opacity;
        }
    }

    pub fn compare_outline_size(&self, operator: RelationalOperator, value: f64) -> bool {
        operator.compare(self.get_outline_size(), value)
    }

    pub fn compare_fill_opacity(&self, operator: RelationalOperator, value: f64) -> bool {
        operator.compare(self.get_fill_opacity(), value)
    }

    pub fn compare_outline_opacity(&self, operator: RelationalOperator, value: f64) -> bool {
        operator.compare(self.get_outline_opacity(), value)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Opacities are clamped to 0-255; non-finite results are rejected
fn opacity(value: f64) -> Option<u8> {
    value.is_finite().then(|| value.clamp(0.0, 255.0) as u8)
}

impl RuntimeObject for DrawerObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn object_type(&self) -> &str {
        DRAWER_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Factory bound to the drawer object in the extension declaration
pub fn create_drawer_object(name: &str) -> Box<dyn RuntimeObject> {
    Box::new(DrawerObject::new(name))
}
