//! Collision detection between the circular body and gate regions
//!
//! Gates are axis-aligned rectangles, so the nearest-point test is exact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Point inside (or on the edge of) the rectangle closest to `p`
    #[inline]
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            clamp(p.x, self.x, self.right()),
            clamp(p.y, self.y, self.bottom()),
        )
    }
}

/// Check whether a circle overlaps a rectangle.
///
/// Clamps the circle center into the rectangle on each axis to find the
/// nearest point, then compares squared distance against radius squared.
/// Touching counts as overlap. A center inside the rectangle is its own
/// nearest point, so it always overlaps.
#[inline]
pub fn circle_rect_overlap(rect: Rect, center: Vec2, radius: f32) -> bool {
    let nearest = rect.nearest_point(center);
    (center - nearest).length_squared() <= radius * radius
}
