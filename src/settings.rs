//! Physics configuration
//!
//! Every tunable the simulation reads lives here instead of in module
//! globals, so independent game instances (and tests) never share state.
//! Loaded from JSON; missing fields fall back to the defaults in
//! [`crate::consts`].

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Breakout simulation parameters (screen space, pixels, seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Paddle ===
    pub paddle_size: Vec2,
    /// Horizontal paddle speed (pixels/s)
    pub paddle_speed: f32,
    /// How strongly an off-centre hit deflects the ball
    pub paddle_strength: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Launch velocity, also the reference for paddle deflection
    pub initial_ball_velocity: Vec2,
    /// Multiplier applied by the Speed power-up
    pub speed_boost: f32,

    // === Power-ups ===
    pub powerup_size: Vec2,
    pub powerup_velocity: Vec2,
    /// Spawn chance is 1 in N for beneficial power-ups
    pub positive_spawn_odds: u32,
    /// Spawn chance is 1 in N for screen-effect power-ups
    pub negative_spawn_odds: u32,
    /// Width added by the pad-size power-up
    pub pad_size_increase: f32,

    // === Run ===
    pub lives: u8,
    /// Seed for the power-up RNG
    pub seed: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            paddle_size: PADDLE_SIZE,
            paddle_speed: PADDLE_SPEED,
            paddle_strength: PADDLE_STRENGTH,

            ball_radius: BALL_RADIUS,
            initial_ball_velocity: INITIAL_BALL_VELOCITY,
            speed_boost: 1.2,

            powerup_size: POWERUP_SIZE,
            powerup_velocity: POWERUP_VELOCITY,
            positive_spawn_odds: 75,
            negative_spawn_odds: 15,
            pad_size_increase: 50.0,

            lives: STARTING_LIVES,
            seed: 0,
        }
    }
}

impl PhysicsConfig {
    /// Parse from a JSON document and validate
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid physics config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded physics config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.arena_width > 0.0 && self.arena_height > 0.0,
            "arena must have positive size"
        );
        anyhow::ensure!(self.ball_radius > 0.0, "ball radius must be positive");
        anyhow::ensure!(
            self.paddle_size.x > 0.0 && self.paddle_size.y > 0.0,
            "paddle size must be positive"
        );
        anyhow::ensure!(
            self.powerup_size.x > 0.0 && self.powerup_size.y > 0.0,
            "power-up size must be positive"
        );
        anyhow::ensure!(
            self.paddle_size.x < self.arena_width,
            "paddle wider than the arena"
        );
        anyhow::ensure!(
            self.positive_spawn_odds > 0 && self.negative_spawn_odds > 0,
            "spawn odds must be at least 1"
        );
        anyhow::ensure!(self.lives > 0, "need at least one life");
        Ok(())
    }
}

/// Bounce-and-settle demo parameters (y up, metres, seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    pub initial_height: f32,
    pub initial_velocity: f32,
    /// Downward acceleration magnitude
    pub gravity: f32,
    /// Fraction of speed kept after a bounce, in (0, 1)
    pub restitution: f32,
    /// Rebound speed below which the body is considered settled
    pub rest_speed: f32,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            initial_height: 4.0,
            initial_velocity: 1.0,
            gravity: GRAVITY,
            restitution: RESTITUTION,
            rest_speed: REST_SPEED,
        }
    }
}

impl BounceConfig {
    /// Reject values the bounce model is undefined for
    pub fn check(&self) -> Result<()> {
        anyhow::ensure!(
            self.restitution > 0.0 && self.restitution < 1.0,
            "restitution must be in (0, 1), got {}",
            self.restitution
        );
        anyhow::ensure!(self.gravity > 0.0, "gravity must be positive");
        anyhow::ensure!(self.rest_speed > 0.0, "rest speed must be positive");
        anyhow::ensure!(
            self.initial_height >= 0.0,
            "body must start above the floor, got height {}",
            self.initial_height
        );
        Ok(())
    }

    /// Panics on values the bounce model is undefined for
    pub fn validate(&self) {
        if let Err(err) = self.check() {
            panic!("{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PhysicsConfig::from_json(r#"{ "ball_radius": 8.0, "seed": 42 }"#).unwrap();
        assert_eq!(config.ball_radius, 8.0);
        assert_eq!(config.seed, 42);
        assert_eq!(config.paddle_size, PADDLE_SIZE);
        assert_eq!(config.initial_ball_velocity, INITIAL_BALL_VELOCITY);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = PhysicsConfig {
            lives: 5,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(PhysicsConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(PhysicsConfig::from_json(r#"{ "ball_radius": -1.0 }"#).is_err());
        assert!(PhysicsConfig::from_json(r#"{ "lives": 0 }"#).is_err());
        assert!(PhysicsConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = PhysicsConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    #[should_panic(expected = "restitution must be in (0, 1)")]
    fn test_bounce_config_rejects_elastic() {
        BounceConfig {
            restitution: 1.0,
            ..Default::default()
        }
        .validate();
    }

    #[test]
    fn test_bounce_config_check_reports_bad_height() {
        let err = BounceConfig {
            initial_height: -1.0,
            ..Default::default()
        }
        .check()
        .unwrap_err();
        assert!(err.to_string().contains("above the floor"));
        assert!(BounceConfig::default().check().is_ok());
    }
}
