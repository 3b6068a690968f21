//! Rectangular confinement region
//!
//! Walls reflect the crossing velocity component and mirror the position
//! back inside. Any wall can be left open (the Breakout floor).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::reflect_velocity;

/// One side of the confinement region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

impl Wall {
    /// Normal pointing into the region
    pub fn inward_normal(self) -> Vec2 {
        match self {
            Wall::Left => Vec2::X,
            Wall::Right => Vec2::NEG_X,
            Wall::Top => Vec2::Y,
            Wall::Bottom => Vec2::NEG_Y,
        }
    }
}

/// Axis-aligned walls in screen space (top < bottom)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    /// Open walls let bodies leave instead of reflecting them
    #[serde(default)]
    pub open_bottom: bool,
}

impl Bounds {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        assert!(left < right, "bounds need left < right ({left} >= {right})");
        assert!(top < bottom, "bounds need top < bottom ({top} >= {bottom})");
        Self {
            left,
            right,
            top,
            bottom,
            open_bottom: false,
        }
    }

    /// Arena of the given size anchored at the origin
    pub fn arena(width: f32, height: f32) -> Self {
        Self::new(0.0, width, 0.0, height)
    }

    pub fn with_open_bottom(mut self) -> Self {
        self.open_bottom = true;
        self
    }

    /// Whether a body of the given half extent lies fully inside
    pub fn contains(&self, center: Vec2, half_extent: Vec2) -> bool {
        center.x - half_extent.x >= self.left
            && center.x + half_extent.x <= self.right
            && center.y - half_extent.y >= self.top
            && center.y + half_extent.y <= self.bottom
    }

    /// Whether the body has fully crossed the bottom wall
    pub fn below_floor(&self, center: Vec2, half_extent: Vec2) -> bool {
        center.y - half_extent.y >= self.bottom
    }

    /// Confine a body to the region.
    ///
    /// For every closed wall the body touches or crosses: mirror the
    /// overshoot back inside and reflect the velocity if it still points
    /// outward. Returns the walls that were hit, in left/right/top/bottom
    /// order.
    pub fn confine(&self, center: &mut Vec2, velocity: &mut Vec2, half_extent: Vec2) -> Vec<Wall> {
        let mut hits = Vec::new();

        let min_x = self.left + half_extent.x;
        let max_x = self.right - half_extent.x;
        let min_y = self.top + half_extent.y;
        let max_y = self.bottom - half_extent.y;

        if center.x <= min_x {
            center.x = (2.0 * min_x - center.x).min(max_x);
            self.reflect(velocity, Wall::Left, &mut hits);
        } else if center.x >= max_x {
            center.x = (2.0 * max_x - center.x).max(min_x);
            self.reflect(velocity, Wall::Right, &mut hits);
        }

        if center.y <= min_y {
            center.y = (2.0 * min_y - center.y).min(max_y);
            self.reflect(velocity, Wall::Top, &mut hits);
        } else if center.y >= max_y && !self.open_bottom {
            center.y = (2.0 * max_y - center.y).max(min_y);
            self.reflect(velocity, Wall::Bottom, &mut hits);
        }

        hits
    }

    fn reflect(&self, velocity: &mut Vec2, wall: Wall, hits: &mut Vec<Wall>) {
        let normal = wall.inward_normal();
        // Only flip velocities still heading out through the wall
        if velocity.dot(normal) < 0.0 {
            *velocity = reflect_velocity(*velocity, normal);
        }
        hits.push(wall);
    }
}
