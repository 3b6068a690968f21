//! Collision detection for circles and axis-aligned rectangles
//!
//! The ball is tested against bricks and the paddle with a closest-point
//! query; power-ups and the paddle use a plain AABB overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Circle, Rect};

/// Side of a rectangle the circle is on when they touch
///
/// Screen space: `Up` means the circle sits above the top face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// Classification table, walked in order. First maximum wins on ties.
const COMPASS: [(Direction, Vec2); 4] = [
    (Direction::Up, Vec2::new(0.0, -1.0)),
    (Direction::Right, Vec2::new(1.0, 0.0)),
    (Direction::Down, Vec2::new(0.0, 1.0)),
    (Direction::Left, Vec2::new(-1.0, 0.0)),
];

impl Direction {
    /// Whether a hit from this side reflects the horizontal velocity
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Outward unit normal of the face on this side
    #[inline]
    pub fn normal(self) -> Vec2 {
        COMPASS[self as usize].1
    }

    /// Next direction clockwise on screen (Up -> Right -> Down -> Left)
    pub fn clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// Nearest cardinal direction to `target` by cosine similarity.
    ///
    /// A zero vector has no direction and classifies as `Up`.
    pub fn classify(target: Vec2) -> Self {
        let target = target.normalize_or_zero();
        if target == Vec2::ZERO {
            return Direction::Up;
        }

        let mut best = Direction::Up;
        let mut max = f32::NEG_INFINITY;
        for (direction, unit) in COMPASS {
            let dot = target.dot(unit);
            // Strict comparison keeps the earlier entry on ties
            if dot > max {
                max = dot;
                best = direction;
            }
        }
        best
    }
}

/// Result of a circle/rect collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the circle touches or overlaps the rect
    pub collided: bool,
    /// Side of the rect the circle is on
    pub direction: Direction,
    /// Circle centre minus the closest point on the rect
    pub difference: Vec2,
}

impl CollisionResult {
    pub fn miss(direction: Direction, difference: Vec2) -> Self {
        Self {
            collided: false,
            direction,
            difference,
        }
    }

    /// Overlap along the axis the ball will be pushed out on
    pub fn penetration(&self, radius: f32) -> f32 {
        let along = if self.direction.is_horizontal() {
            self.difference.x
        } else {
            self.difference.y
        };
        radius - along.abs()
    }
}

/// Check a circle against an axis-aligned rect
///
/// Clamps the circle centre into the rect to find the closest point, then
/// compares the remaining distance with the radius.
pub fn check_circle_rect(circle: &Circle, rect: &Rect) -> CollisionResult {
    let closest = rect.closest_point(circle.center);
    let difference = circle.center - closest;
    let direction = Direction::classify(difference);

    if difference.length() <= circle.radius {
        CollisionResult {
            collided: true,
            direction,
            difference,
        }
    } else {
        CollisionResult::miss(direction, difference)
    }
}

/// Check two axis-aligned rects for overlap (touching edges count)
pub fn check_rect_rect(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    let overlap_x = a_max.x >= b_min.x && b_max.x >= a_min.x;
    let overlap_y = a_max.y >= b_min.y && b_max.y >= a_min.y;
    overlap_x && overlap_y
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paddle() -> Rect {
        Rect::new(Vec2::new(350.0, 550.0), Vec2::new(100.0, 20.0))
    }

    #[test]
    fn test_ball_resting_in_paddle_top_is_up() {
        let ball = Circle::new(Vec2::new(400.0, 568.0), 12.5, Vec2::new(0.0, 350.0));
        let result = check_circle_rect(&ball, &paddle());
        assert!(result.collided);
        assert_eq!(result.direction, Direction::Up);
    }

    #[test]
    fn test_ball_above_paddle_is_up() {
        let ball = Circle::new(Vec2::new(410.0, 540.0), 12.5, Vec2::ZERO);
        let result = check_circle_rect(&ball, &paddle());
        assert!(result.collided);
        assert_eq!(result.direction, Direction::Up);
        assert_eq!(result.difference, Vec2::new(0.0, -10.0));
        assert!((result.penetration(12.5) - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_side_hits() {
        let brick = Rect::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 20.0));

        let left = Circle::new(Vec2::new(92.0, 110.0), 10.0, Vec2::ZERO);
        let result = check_circle_rect(&left, &brick);
        assert!(result.collided);
        assert_eq!(result.direction, Direction::Left);

        let right = Circle::new(Vec2::new(155.0, 110.0), 10.0, Vec2::ZERO);
        let result = check_circle_rect(&right, &brick);
        assert!(result.collided);
        assert_eq!(result.direction, Direction::Right);

        let below = Circle::new(Vec2::new(120.0, 125.0), 10.0, Vec2::ZERO);
        let result = check_circle_rect(&below, &brick);
        assert!(result.collided);
        assert_eq!(result.direction, Direction::Down);
    }

    #[test]
    fn test_miss_just_outside_radius() {
        let brick = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let ball = Circle::new(Vec2::new(-5.01, 5.0), 5.0, Vec2::ZERO);
        assert!(!check_circle_rect(&ball, &brick).collided);

        // Exactly touching counts
        let ball = Circle::new(Vec2::new(-5.0, 5.0), 5.0, Vec2::ZERO);
        assert!(check_circle_rect(&ball, &brick).collided);
    }

    #[test]
    fn test_corner_miss() {
        // Inside the AABB of the circle but outside the circle itself
        let brick = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let ball = Circle::new(Vec2::new(14.0, 14.0), 5.0, Vec2::ZERO);
        assert!(!check_circle_rect(&ball, &brick).collided);
    }

    #[test]
    fn test_zero_vector_defaults_to_up() {
        assert_eq!(Direction::classify(Vec2::ZERO), Direction::Up);
    }

    #[test]
    fn test_diagonal_tie_takes_first_entry() {
        // (1,-1) is equally Up and Right; Up comes first
        assert_eq!(Direction::classify(Vec2::new(1.0, -1.0)), Direction::Up);
        // (1,1) is equally Right and Down; Right comes first
        assert_eq!(Direction::classify(Vec2::new(1.0, 1.0)), Direction::Right);
    }

    #[test]
    fn test_normals_follow_compass() {
        assert_eq!(Direction::Up.normal(), Vec2::new(0.0, -1.0));
        assert_eq!(Direction::Right.normal(), Vec2::new(1.0, 0.0));
        assert_eq!(Direction::Down.normal(), Vec2::new(0.0, 1.0));
        assert_eq!(Direction::Left.normal(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_rect_rect_overlap() {
        let a = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Rect::new(Vec2::new(20.0, 0.0), Vec2::new(5.0, 5.0));
        let touching = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0));
        assert!(check_rect_rect(&a, &b));
        assert!(check_rect_rect(&b, &a));
        assert!(!check_rect_rect(&a, &c));
        assert!(check_rect_rect(&a, &touching));
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 50.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!((reflected.y - 50.0).abs() < 0.001);
    }

    fn rotate_clockwise(v: Vec2) -> Vec2 {
        // +90° on screen (y down): Up (0,-1) -> Right (1,0)
        Vec2::new(-v.y, v.x)
    }

    proptest! {
        #[test]
        fn prop_center_inside_always_collides(
            x in 0.0f32..800.0, y in 0.0f32..600.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
            fx in 0.01f32..0.99, fy in 0.01f32..0.99,
            radius in 0.5f32..50.0,
        ) {
            let rect = Rect::new(Vec2::new(x, y), Vec2::new(w, h));
            let center = Vec2::new(x + w * fx, y + h * fy);
            let ball = Circle::new(center, radius, Vec2::ZERO);
            prop_assert!(check_circle_rect(&ball, &rect).collided);
        }

        #[test]
        fn prop_separated_never_collides(
            w in 1.0f32..200.0, h in 1.0f32..200.0,
            radius in 0.5f32..50.0,
            gap in 0.01f32..100.0,
            along in 0.0f32..1.0,
            side in 0usize..4,
        ) {
            let rect = Rect::new(Vec2::ZERO, Vec2::new(w, h));
            let center = match side {
                0 => Vec2::new(w * along, -(radius + gap)),
                1 => Vec2::new(w + radius + gap, h * along),
                2 => Vec2::new(w * along, h + radius + gap),
                _ => Vec2::new(-(radius + gap), h * along),
            };
            let ball = Circle::new(center, radius, Vec2::ZERO);
            prop_assert!(!check_circle_rect(&ball, &rect).collided);
        }

        #[test]
        fn prop_rotation_cycles_direction(angle in 0.0f32..std::f32::consts::TAU, len in 0.1f32..100.0) {
            // Stay clear of the diagonal ties
            let offset = (angle % std::f32::consts::FRAC_PI_2 - std::f32::consts::FRAC_PI_4).abs();
            prop_assume!(offset > 1e-3);

            let v = Vec2::new(angle.cos(), angle.sin()) * len;
            let d = Direction::classify(v);
            prop_assert_eq!(Direction::classify(rotate_clockwise(v)), d.clockwise());
        }
    }
}
