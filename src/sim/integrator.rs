//! Kinematic integration for moving bodies
//!
//! Bodies advance by an explicit per-frame `dt`:
//!
//! ```text
//! constant velocity:  x_new = x + v*dt
//! with gravity a:     x_new = x + v*dt + 0.5*a*dt²
//!                     v_new = v + a*dt
//! ```
//!
//! The gravity update is the exact solution for constant acceleration, so a
//! frame-rate change does not change the trajectory between bounces.
//!
//! [`BouncingBody`] is the bounce-and-settle toy: a body dropped onto a floor
//! that loses a fraction of its speed on every bounce until it comes to rest.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Circle, Rect};
use crate::settings::BounceConfig;

/// Anything with a position and velocity the integrator can move
pub trait Kinematic {
    fn position_mut(&mut self) -> &mut Vec2;
    fn velocity_mut(&mut self) -> &mut Vec2;
}

impl Kinematic for Circle {
    fn position_mut(&mut self) -> &mut Vec2 {
        &mut self.center
    }

    fn velocity_mut(&mut self) -> &mut Vec2 {
        &mut self.velocity
    }
}

impl Kinematic for Rect {
    fn position_mut(&mut self) -> &mut Vec2 {
        &mut self.position
    }

    fn velocity_mut(&mut self) -> &mut Vec2 {
        &mut self.velocity
    }
}

/// Advance a body at constant velocity
pub fn advance<B: Kinematic>(body: &mut B, dt: f32) {
    let velocity = *body.velocity_mut();
    *body.position_mut() += velocity * dt;
}

/// Advance a body under constant acceleration
pub fn advance_with_gravity<B: Kinematic>(body: &mut B, gravity: Vec2, dt: f32) {
    let velocity = *body.velocity_mut();
    *body.position_mut() += velocity * dt + gravity * (0.5 * dt * dt);
    *body.velocity_mut() += gravity * dt;
}

/// Whether a bouncing body is still being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    Moving,
    /// Settled on the floor; only [`BouncingBody::launch`] wakes it
    AtRest,
}

/// A body bouncing on a floor at height zero (y up)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BouncingBody {
    /// Height above the floor
    pub height: f32,
    /// Vertical velocity (positive is up)
    pub velocity: f32,
    pub motion: Motion,
    /// Number of floor contacts since the last launch
    pub bounces: u32,
    config: BounceConfig,
}

impl BouncingBody {
    pub fn new(config: BounceConfig) -> Self {
        config.validate();
        Self {
            height: config.initial_height,
            velocity: config.initial_velocity,
            motion: Motion::Moving,
            bounces: 0,
            config,
        }
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.motion == Motion::AtRest
    }

    /// Kick the body upward. The only way out of `AtRest`.
    pub fn launch(&mut self, impulse: f32) {
        self.velocity = impulse;
        self.motion = Motion::Moving;
        self.bounces = 0;
        log::debug!("Bouncing body launched at {impulse}");
    }

    /// Advance by `dt`. Returns true when the body bounced this step.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.is_at_rest() {
            return false;
        }

        let g = self.config.gravity;
        self.height += self.velocity * dt - 0.5 * g * dt * dt;
        self.velocity -= g * dt;

        self.resolve_floor()
    }

    fn resolve_floor(&mut self) -> bool {
        if self.height >= 0.0 || self.velocity >= 0.0 {
            return false;
        }

        self.velocity *= -self.config.restitution;
        self.height = -self.height;
        self.bounces += 1;

        if self.velocity.abs() < self.config.rest_speed {
            self.velocity = 0.0;
            self.height = 0.0;
            self.motion = Motion::AtRest;
            log::info!("Body came to rest after {} bounces", self.bounces);
        } else {
            log::debug!(
                "Bounce {}: rebound speed {:.3}",
                self.bounces,
                self.velocity
            );
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn demo_config() -> BounceConfig {
        BounceConfig {
            initial_height: 4.0,
            initial_velocity: 5.0,
            gravity: 9.8,
            restitution: 0.45,
            rest_speed: 0.5,
        }
    }

    #[test]
    fn test_constant_velocity() {
        let mut ball = Circle::new(Vec2::ZERO, 1.0, Vec2::new(10.0, -5.0));
        advance(&mut ball, 0.5);
        assert_eq!(ball.center, Vec2::new(5.0, -2.5));
        assert_eq!(ball.velocity, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_falling_rect() {
        let mut capsule =
            Rect::new(Vec2::new(100.0, 0.0), Vec2::new(60.0, 20.0)).with_velocity(Vec2::new(0.0, 150.0));
        advance(&mut capsule, 2.0);
        assert_eq!(capsule.position, Vec2::new(100.0, 300.0));
    }

    #[test]
    fn test_free_fall_matches_closed_form() {
        let mut ball = Circle::new(Vec2::new(0.0, 0.0), 1.0, Vec2::ZERO);
        let gravity = Vec2::new(0.0, 9.8);
        for _ in 0..60 {
            advance_with_gravity(&mut ball, gravity, SIM_DT);
        }
        // After one second: y = 0.5 * g * t²
        assert!((ball.center.y - 4.9).abs() < 1e-3, "y = {}", ball.center.y);
        assert!((ball.velocity.y - 9.8).abs() < 1e-3);
    }

    #[test]
    fn test_settles_within_bounded_bounces() {
        let mut body = BouncingBody::new(demo_config());
        let mut peaks = Vec::new();
        let mut peak = body.height;

        for _ in 0..100_000 {
            peak = peak.max(body.height);
            if body.step(SIM_DT) {
                peaks.push(peak);
                peak = body.height;
            }
            if body.is_at_rest() {
                break;
            }
        }

        assert!(body.is_at_rest());
        assert!(body.bounces < 50, "took {} bounces", body.bounces);
        assert_eq!(body.height, 0.0);
        assert_eq!(body.velocity, 0.0);
        for pair in peaks.windows(2) {
            assert!(pair[1] < pair[0], "peaks not decreasing: {peaks:?}");
        }
    }

    #[test]
    fn test_rest_is_sticky_until_launch() {
        let mut body = BouncingBody::new(demo_config());
        while !body.is_at_rest() {
            body.step(SIM_DT);
        }

        for _ in 0..10 {
            assert!(!body.step(SIM_DT));
        }
        assert_eq!(body.height, 0.0);

        body.launch(5.0);
        assert_eq!(body.motion, Motion::Moving);
        body.step(SIM_DT);
        assert!(body.height > 0.0);
    }

    #[test]
    fn test_bounce_scales_velocity_by_restitution() {
        let mut body = BouncingBody::new(demo_config());
        body.height = 0.01;
        body.velocity = -10.0;

        assert!(body.step(SIM_DT));
        let impact = 10.0 + 9.8 * SIM_DT;
        assert!((body.velocity - 0.45 * impact).abs() < 1e-4);
        assert!(body.height > 0.0);
    }
}
