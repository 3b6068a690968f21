//! Breakout core - collision resolution and bounce kinematics
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, integration, game state)
//! - `settings`: Data-driven physics configuration (JSON)
//!
//! Windowing, shaders, textures and input polling live outside this crate.
//! The host loop feeds [`sim::TickInput`] into [`sim::tick`] and draws what
//! [`sim::GameState::render_list`] hands back.

pub mod settings;
pub mod sim;

pub use settings::{BounceConfig, PhysicsConfig};

/// Default configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Arena dimensions (screen space, +y down)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const PADDLE_SPEED: f32 = 500.0;
    /// Horizontal deflection strength when the ball hits off-centre
    pub const PADDLE_STRENGTH: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);

    /// Power-up capsule defaults
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);

    pub const STARTING_LIVES: u8 = 3;
    pub const BRICK_SCORE: u64 = 10;

    /// Bounce-and-settle demo defaults (y up, metres)
    pub const GRAVITY: f32 = 9.8;
    pub const RESTITUTION: f32 = 0.45;
    pub const REST_SPEED: f32 = 0.5;
}

