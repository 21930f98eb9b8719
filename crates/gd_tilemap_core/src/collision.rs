//! Collision masks for tiles
//!
//! A `CollisionShape` describes the solid part of a tile cell. Coordinates are
//! normalized to the cell (0-1 on each axis, origin at the top-left corner) so
//! the same mask works for any tile size.

use crate::Rect;
use serde::{Deserialize, Serialize};

/// Collision mask of a tile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum CollisionShape {
    /// Not collidable
    None,
    /// The whole tile cell
    Full,
    /// Sub-rectangle of the cell
    Rectangle {
        /// Top-left corner [x, y] (0-1 normalized)
        #[serde(default)]
        offset: [f32; 2],
        /// Size [width, height] (0-1 normalized)
        #[serde(default = "default_full_size")]
        size: [f32; 2],
    },
    /// Convex polygon within the cell
    Polygon {
        /// Vertices in cell coordinates (0-1 normalized)
        points: Vec<[f32; 2]>,
    },
}

fn default_full_size() -> [f32; 2] {
    [1.0, 1.0]
}

impl Default for CollisionShape {
    fn default() -> Self {
        CollisionShape::Full
    }
}

impl CollisionShape {
    /// Check if this shape has collision
    pub fn has_collision(&self) -> bool {
        match self {
            CollisionShape::None => false,
            CollisionShape::Polygon { points } => points.len() >= 3,
            _ => true,
        }
    }

    /// Create a rectangle shape with offset and size
    pub fn rectangle(offset: [f32; 2], size: [f32; 2]) -> Self {
        CollisionShape::Rectangle { offset, size }
    }

    /// Create a polygon shape from points
    pub fn polygon(points: Vec<[f32; 2]>) -> Self {
        CollisionShape::Polygon { points }
    }

    /// Get the display name of this shape type
    pub fn name(&self) -> &'static str {
        match self {
            CollisionShape::None => "None",
            CollisionShape::Full => "Full",
            CollisionShape::Rectangle { .. } => "Rectangle",
            CollisionShape::Polygon { .. } => "Polygon",
        }
    }

    /// World-space bounding box of the mask once placed in `cell`.
    ///
    /// Returns `None` when the shape has no collision.
    pub fn world_bounds(&self, cell: &Rect) -> Option<Rect> {
        match self {
            CollisionShape::None => None,
            CollisionShape::Full => Some(*cell),
            CollisionShape::Rectangle { offset, size } => {
                let min = cell.denormalize(*offset);
                let max = cell.denormalize([offset[0] + size[0], offset[1] + size[1]]);
                Some(Rect::from_corners(min, max))
            }
            CollisionShape::Polygon { points } => {
                if points.len() < 3 {
                    return None;
                }
                let mut min = [f32::INFINITY; 2];
                let mut max = [f32::NEG_INFINITY; 2];
                for point in points {
                    let world = cell.denormalize(*point);
                    min = [min[0].min(world[0]), min[1].min(world[1])];
                    max = [max[0].max(world[0]), max[1].max(world[1])];
                }
                Some(Rect { min, max })
            }
        }
    }

    /// Test this mask, placed in `cell`, against a world-space rectangle.
    ///
    /// Closed intervals: touching counts as overlapping.
    pub fn overlaps(&self, cell: &Rect, target: &Rect) -> bool {
        match self {
            CollisionShape::None => false,
            CollisionShape::Full | CollisionShape::Rectangle { .. } => self
                .world_bounds(cell)
                .is_some_and(|bounds| bounds.intersects(target)),
            CollisionShape::Polygon { points } => {
                if points.len() < 3 {
                    return false;
                }
                let world: Vec<[f32; 2]> = points.iter().map(|p| cell.denormalize(*p)).collect();
                polygon_intersects_rect(&world, target)
            }
        }
    }
}

/// Separating axis test between a convex polygon and an axis-aligned rectangle
fn polygon_intersects_rect(polygon: &[[f32; 2]], rect: &Rect) -> bool {
    let corners = rect.corners();

    // Rectangle axes
    let mut axes: Vec<[f32; 2]> = vec![[1.0, 0.0], [0.0, 1.0]];
    // Polygon edge normals
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        let edge = [b[0] - a[0], b[1] - a[1]];
        if edge[0] != 0.0 || edge[1] != 0.0 {
            axes.push([-edge[1], edge[0]]);
        }
    }

    axes.iter().all(|axis| {
        let (poly_min, poly_max) = project(polygon, *axis);
        let (rect_min, rect_max) = project(&corners, *axis);
        poly_min <= rect_max && rect_min <= poly_max
    })
}

fn project(points: &[[f32; 2]], axis: [f32; 2]) -> (f32, f32) {
    points
        .iter()
        .map(|p| p[0] * axis[0] + p[1] * axis[1])
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), d| {
            (min.min(d), max.max(d))
        })
}
