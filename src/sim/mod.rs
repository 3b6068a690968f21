//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (bricks in level order, power-ups in spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod bounds;
pub mod collision;
pub mod integrator;
pub mod level;
pub mod powerup;
pub mod response;
pub mod state;
pub mod tick;

pub use body::{Circle, Rect};
pub use bounds::{Bounds, Wall};
pub use collision::{CollisionResult, Direction, check_circle_rect, check_rect_rect};
pub use integrator::{BouncingBody, Motion, advance, advance_with_gravity};
pub use level::{Brick, Level};
pub use powerup::{ActiveEffects, PowerUp, PowerUpKind};
pub use response::{BrickHit, bounce_off, bounce_off_paddle, resolve_brick_hit};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, Sprite};
pub use tick::{TickInput, tick};
