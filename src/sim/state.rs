//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]. Rendering reads it
//! back through [`GameState::render_list`].

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Circle, Rect};
use super::bounds::{Bounds, Wall};
use super::level::Level;
use super::powerup::{ActiveEffects, PowerUp, PowerUpKind};
use crate::settings::PhysicsConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level select, waiting for launch input
    Menu,
    /// Active gameplay
    Active,
    /// Level cleared, waiting for input to return to the menu
    Win,
}

/// Things that happened during a tick, for audio/effects hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BallLaunched,
    WallHit(Wall),
    PaddleHit,
    /// Solid brick deflected the ball
    BrickDeflected { index: usize },
    BrickDestroyed { index: usize },
    PowerUpSpawned(PowerUpKind),
    PowerUpActivated(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    BallLost { lives_left: u8 },
    GameOver,
    LevelWon { level: usize },
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: Circle,
    /// Riding on the paddle, waiting for launch
    pub stuck: bool,
    pub color: Vec3,
}

impl Ball {
    /// Place the ball on top of the paddle's centre, stuck
    pub fn on_paddle(paddle: &Paddle, radius: f32, velocity: Vec2) -> Self {
        let center = Vec2::new(paddle.rect.center().x, paddle.rect.min().y - radius);
        Self {
            body: Circle::new(center, radius, velocity),
            stuck: true,
            color: Vec3::ONE,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    pub color: Vec3,
}

impl Paddle {
    /// Paddle centred at the bottom of the arena
    pub fn centered(config: &PhysicsConfig) -> Self {
        let position = Vec2::new(
            config.arena_width / 2.0 - config.paddle_size.x / 2.0,
            config.arena_height - config.paddle_size.y,
        );
        Self {
            rect: Rect::new(position, config.paddle_size),
            color: Vec3::ONE,
        }
    }

    /// Slide horizontally by `dx`, staying inside the arena.
    /// Returns the distance actually moved.
    pub fn slide(&mut self, dx: f32, arena_width: f32) -> f32 {
        let max_x = (arena_width - self.rect.size.x).max(0.0);
        let old_x = self.rect.position.x;
        self.rect.position.x = (old_x + dx).clamp(0.0, max_x);
        self.rect.position.x - old_x
    }
}

/// One thing to draw: (position, size, rotation, colour)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub position: Vec2,
    pub size: Vec2,
    /// Degrees
    pub rotation: f32,
    pub color: Vec3,
}

impl Sprite {
    fn rect(rect: &Rect, color: Vec3) -> Self {
        Self {
            position: rect.position,
            size: rect.size,
            rotation: 0.0,
            color,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: PhysicsConfig,
    pub phase: GamePhase,
    pub bounds: Bounds,
    pub paddle: Paddle,
    pub ball: Ball,
    pub levels: Vec<Level>,
    /// Index into `levels`
    pub level: usize,
    /// Power-ups in spawn order
    pub powerups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    pub lives: u8,
    pub score: u64,
    /// Seconds of screen shake left (solid brick hits)
    pub shake_time: f32,
    /// Events emitted by the last tick
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game over the given levels
    pub fn new(config: PhysicsConfig, levels: Vec<Level>) -> Self {
        assert!(!levels.is_empty(), "a game needs at least one level");

        let paddle = Paddle::centered(&config);
        let ball = Ball::on_paddle(&paddle, config.ball_radius, config.initial_ball_velocity);
        let bounds = Bounds::arena(config.arena_width, config.arena_height).with_open_bottom();

        Self {
            phase: GamePhase::Menu,
            bounds,
            paddle,
            ball,
            levels,
            level: 0,
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            lives: config.lives,
            score: 0,
            shake_time: 0.0,
            events: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(config.seed),
            config,
        }
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.level]
    }

    pub fn current_level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.level]
    }

    /// Restore the current level's bricks, score and lives
    pub fn reset_level(&mut self) {
        self.current_level_mut().reset();
        self.score = 0;
        self.lives = self.config.lives;
    }

    /// Put paddle and ball back to their start, drop all power-ups
    pub fn reset_player(&mut self) {
        self.paddle = Paddle::centered(&self.config);
        self.ball = Ball::on_paddle(
            &self.paddle,
            self.config.ball_radius,
            self.config.initial_ball_velocity,
        );
        self.powerups.clear();
        self.effects = ActiveEffects::default();
    }

    /// Switch to another level (wraps around)
    pub fn select_level(&mut self, level: usize) {
        self.level = level % self.levels.len();
        self.reset_level();
        self.reset_player();
        log::info!("Selected level {}", self.level);
    }

    /// Apply a collected power-up. Returns false when the effect was blocked.
    pub fn activate_powerup(&mut self, kind: PowerUpKind) -> bool {
        match kind {
            PowerUpKind::Speed => self.ball.body.velocity *= self.config.speed_boost,
            PowerUpKind::Sticky => {
                self.effects.sticky = true;
                self.paddle.color = kind.color();
            }
            PowerUpKind::PassThrough => {
                self.effects.pass_through = true;
                self.ball.color = kind.color();
            }
            PowerUpKind::PadSizeIncrease => {
                self.paddle.rect.size.x += self.config.pad_size_increase;
                // Keep the wider paddle inside the arena
                self.paddle.slide(0.0, self.config.arena_width);
            }
            // The two screen effects never stack
            PowerUpKind::Confuse | PowerUpKind::Chaos
                if self.effects.confuse || self.effects.chaos =>
            {
                if !self.effects.is_set(kind) {
                    log::debug!("Power-up {kind:?} blocked by the other screen effect");
                    return false;
                }
            }
            PowerUpKind::Confuse => self.effects.confuse = true,
            PowerUpKind::Chaos => self.effects.chaos = true,
        }
        log::debug!("Power-up {kind:?} activated");
        self.events.push(GameEvent::PowerUpActivated(kind));
        true
    }

    /// Undo a timed power-up whose last instance ran out
    pub fn deactivate_powerup(&mut self, kind: PowerUpKind) {
        self.effects.clear(kind);
        match kind {
            PowerUpKind::Sticky => self.paddle.color = Vec3::ONE,
            PowerUpKind::PassThrough => self.ball.color = Vec3::ONE,
            _ => {}
        }
        self.events.push(GameEvent::PowerUpExpired(kind));
    }

    /// Everything visible this frame: bricks, paddle, power-ups, ball
    pub fn render_list(&self) -> Vec<Sprite> {
        let mut sprites: Vec<Sprite> = self
            .current_level()
            .active_bricks()
            .map(|b| Sprite::rect(&b.rect, b.color))
            .collect();

        sprites.push(Sprite::rect(&self.paddle.rect, self.paddle.color));
        sprites.extend(
            self.powerups
                .iter()
                .filter(|p| p.is_falling())
                .map(|p| Sprite::rect(&p.rect, p.kind.color())),
        );
        sprites.push(Sprite::rect(&self.ball.body.bounding_rect(), self.ball.color));
        sprites
    }
}
