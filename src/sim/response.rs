//! Collision response for the ball
//!
//! Turns a [`CollisionResult`] into a velocity flip and a push out of the
//! struck body. Paddle hits additionally steer the ball by where it landed.

use glam::Vec2;

use super::body::{Circle, Rect};
use super::collision::CollisionResult;
use super::level::Brick;

/// Reflect the ball off the struck side and push it clear of the overlap
///
/// The push-out always happens; the velocity only flips while it still
/// points into the struck face.
pub fn bounce_off(ball: &mut Circle, hit: &CollisionResult) {
    let normal = hit.direction.normal();
    ball.center += normal * hit.penetration(ball.radius);
    if ball.velocity.dot(normal) < 0.0 {
        if hit.direction.is_horizontal() {
            ball.velocity.x = -ball.velocity.x;
        } else {
            ball.velocity.y = -ball.velocity.y;
        }
    }
}

/// Rebound off the paddle.
///
/// Horizontal velocity comes from how far off-centre the ball landed,
/// vertical velocity always points up, and the incoming speed is kept.
pub fn bounce_off_paddle(ball: &mut Circle, paddle: &Rect, base_velocity: Vec2, strength: f32) {
    let speed = ball.speed();
    let half_width = paddle.half_extents().x;
    let offset = (ball.center.x - paddle.center().x) / half_width;

    ball.velocity.x = base_velocity.x * offset * strength;
    ball.velocity.y = -ball.velocity.y.abs();
    ball.velocity = ball.velocity.normalize_or_zero() * speed;

    // Sit on top of the paddle so the next frame starts clear of it
    ball.center.y = ball.center.y.min(paddle.min().y - ball.radius);
}

/// What happened to a brick the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickHit {
    /// Solid brick, ball bounced
    Deflected,
    /// Destructible brick broken and ball bounced
    Destroyed,
    /// Destructible brick broken, ball kept going (pass-through)
    Pierced,
}

/// Apply a ball/brick hit: break the brick unless it is solid, then bounce
/// unless the ball passes through destructible bricks.
pub fn resolve_brick_hit(
    ball: &mut Circle,
    brick: &mut Brick,
    hit: &CollisionResult,
    pass_through: bool,
) -> BrickHit {
    debug_assert!(hit.collided);

    if brick.solid {
        bounce_off(ball, hit);
        return BrickHit::Deflected;
    }

    brick.destroyed = true;
    if pass_through {
        BrickHit::Pierced
    } else {
        bounce_off(ball, hit);
        BrickHit::Destroyed
    }
}
