//! Axis-aligned rectangles in world space

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, stored as its min (top-left) and max
/// (bottom-right) corners in pixels.
///
/// All overlap tests treat the rectangle as a closed set: two rectangles
/// that only share an edge or a corner are considered overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Rect {
    /// Create a rectangle from two corners, in any order
    pub fn from_corners(a: [f32; 2], b: [f32; 2]) -> Self {
        Self {
            min: [a[0].min(b[0]), a[1].min(b[1])],
            max: [a[0].max(b[0]), a[1].max(b[1])],
        }
    }

    /// Create a rectangle from its top-left position and size
    pub fn from_position_size(position: [f32; 2], size: [f32; 2]) -> Self {
        Self::from_corners(position, [position[0] + size[0], position[1] + size[1]])
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> [f32; 2] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
        ]
    }

    /// Closed-interval overlap test (touching edges count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min[0] <= other.max[0]
            && other.min[0] <= self.max[0]
            && self.min[1] <= other.max[1]
            && other.min[1] <= self.max[1]
    }

    /// Check whether a point lies inside or on the border
    pub fn contains_point(&self, point: [f32; 2]) -> bool {
        point[0] >= self.min[0]
            && point[0] <= self.max[0]
            && point[1] >= self.min[1]
            && point[1] <= self.max[1]
    }

    /// Map a point normalized to this rectangle (0-1 on each axis) to world space
    pub fn denormalize(&self, point: [f32; 2]) -> [f32; 2] {
        [
            self.min[0] + point[0] * self.width(),
            self.min[1] + point[1] * self.height(),
        ]
    }

    /// The four corners, clockwise from the top-left
    pub fn corners(&self) -> [[f32; 2]; 4] {
        [
            self.min,
            [self.max[0], self.min[1]],
            self.max,
            [self.min[0], self.max[1]],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes_order() {
        let rect = Rect::from_corners([10.0, 20.0], [0.0, 5.0]);
        assert_eq!(rect.min, [0.0, 5.0]);
        assert_eq!(rect.max, [10.0, 20.0]);
        assert_eq!(rect.width(), 10.0);
        assert_eq!(rect.height(), 15.0);
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = Rect::from_position_size([0.0, 0.0], [32.0, 32.0]);
        let b = Rect::from_position_size([32.0, 0.0], [32.0, 32.0]);
        let corner = Rect::from_position_size([32.0, 32.0], [4.0, 4.0]);
        assert!(a.intersects(&b));
        assert!(a.intersects(&corner));
    }

    #[test]
    fn test_disjoint_rects() {
        let a = Rect::from_position_size([0.0, 0.0], [32.0, 32.0]);
        let b = Rect::from_position_size([32.5, 0.0], [8.0, 8.0]);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_denormalize() {
        let rect = Rect::from_position_size([64.0, 96.0], [32.0, 32.0]);
        assert_eq!(rect.denormalize([0.5, 0.25]), [80.0, 104.0]);
        assert_eq!(rect.center(), [80.0, 112.0]);
    }
}
