//! Power-up capsules
//!
//! Capsules drop from destroyed bricks, fall at a constant velocity and
//! activate when they overlap the paddle. Timed effects count down and are
//! switched off once no capsule of the same kind is still running.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Rect;
use super::integrator::advance;
use crate::settings::PhysicsConfig;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    /// Effect length in seconds (0 = permanent until level reset)
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15.0,
        }
    }

    pub fn color(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    /// Screen effects that hinder the player
    pub fn is_negative(self) -> bool {
        matches!(self, PowerUpKind::Confuse | PowerUpKind::Chaos)
    }

    fn spawn_odds(self, config: &PhysicsConfig) -> u32 {
        if self.is_negative() {
            config.negative_spawn_odds
        } else {
            config.positive_spawn_odds
        }
    }
}

/// A falling (or running) power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub rect: Rect,
    /// Seconds left once activated
    pub duration: f32,
    pub activated: bool,
    /// Collected or fell out of the arena; no longer drawn or collidable
    pub destroyed: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, position: Vec2, config: &PhysicsConfig) -> Self {
        Self {
            kind,
            rect: Rect::new(position, config.powerup_size).with_velocity(config.powerup_velocity),
            duration: kind.duration(),
            activated: false,
            destroyed: false,
        }
    }

    /// Still falling and collectable
    #[inline]
    pub fn is_falling(&self) -> bool {
        !self.destroyed
    }

    /// Whether this power-up keeps its effect alive
    #[inline]
    pub fn is_running(&self) -> bool {
        self.activated
    }

    /// Finished: never drawn again and no effect left to run
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.destroyed && !self.activated
    }
}

/// Flags for effects currently applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub sticky: bool,
    pub pass_through: bool,
    pub confuse: bool,
    pub chaos: bool,
}

impl ActiveEffects {
    /// Whether the flag for `kind` is on (permanent kinds have none)
    pub fn is_set(&self, kind: PowerUpKind) -> bool {
        match kind {
            PowerUpKind::Sticky => self.sticky,
            PowerUpKind::PassThrough => self.pass_through,
            PowerUpKind::Confuse => self.confuse,
            PowerUpKind::Chaos => self.chaos,
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => false,
        }
    }

    /// Turn off the flag a finished power-up kind was holding
    pub fn clear(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Sticky => self.sticky = false,
            PowerUpKind::PassThrough => self.pass_through = false,
            PowerUpKind::Confuse => self.confuse = false,
            PowerUpKind::Chaos => self.chaos = false,
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
        }
    }
}

/// Roll every kind independently at a destroyed brick's position
pub fn roll_spawns<R: Rng>(rng: &mut R, position: Vec2, config: &PhysicsConfig) -> Vec<PowerUp> {
    PowerUpKind::ALL
        .into_iter()
        .filter(|kind| rng.random_range(0..kind.spawn_odds(config)) == 0)
        .map(|kind| PowerUp::new(kind, position, config))
        .collect()
}

/// Move capsules, drop the ones that left the arena, count down running
/// effects. Returns the kinds whose effect ended this step.
pub fn update_powerups(
    powerups: &mut Vec<PowerUp>,
    dt: f32,
    arena_height: f32,
) -> Vec<PowerUpKind> {
    let mut expired = Vec::new();

    for i in 0..powerups.len() {
        let powerup = &mut powerups[i];
        advance(&mut powerup.rect, dt);
        if powerup.rect.position.y >= arena_height {
            powerup.destroyed = true;
        }

        if !powerup.activated {
            continue;
        }
        powerup.duration -= dt;
        if powerup.duration > 0.0 {
            continue;
        }
        powerup.activated = false;
        let kind = powerup.kind;

        // Permanent effects have nothing to undo. Another capsule of the
        // same kind keeps a timed effect on.
        let still_running = powerups.iter().any(|p| p.kind == kind && p.is_running());
        if kind.duration() > 0.0 && !still_running {
            log::debug!("Power-up {kind:?} expired");
            expired.push(kind);
        }
    }

    powerups.retain(|p| !p.is_spent());
    expired
}
