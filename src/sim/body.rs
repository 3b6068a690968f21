//! Body geometry for the ball, paddle, bricks and power-ups
//!
//! Everything is in screen space: +x right, +y down. Circles are stored by
//! centre, rectangles by top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A moving circular body (the ball)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32, velocity: Vec2) -> Self {
        assert!(radius > 0.0, "circle radius must be positive, got {radius}");
        Self {
            center,
            radius,
            velocity,
        }
    }

    /// Current speed (velocity magnitude)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Axis-aligned box enclosing the circle
    pub fn bounding_rect(&self) -> Rect {
        Rect::new(
            self.center - Vec2::splat(self.radius),
            Vec2::splat(self.radius * 2.0),
        )
    }
}

/// An axis-aligned rectangle (bricks, paddle, power-ups)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub position: Vec2,
    pub size: Vec2,
    /// Zero for static bodies
    #[serde(default)]
    pub velocity: Vec2,
}

impl Rect {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        assert!(
            size.x > 0.0 && size.y > 0.0,
            "rect size must be positive, got {size}"
        );
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Build a rect from its centre and half extents (player bounding box style)
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center - half_extents, half_extents * 2.0)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.half_extents()
    }

    /// Closest point on (or in) the rect to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }

    /// Inclusive containment test
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}
