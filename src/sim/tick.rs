//! Per-frame simulation tick
//!
//! Order within one tick: input, ball integration and wall confinement,
//! collisions against the positions just committed, power-up update, then
//! life loss and level completion.

use glam::Vec2;

use super::collision::{check_circle_rect, check_rect_rect};
use super::integrator::advance;
use super::powerup::{roll_spawns, update_powerups};
use super::response::{BrickHit, bounce_off_paddle, resolve_brick_hit};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::BRICK_SCORE;

/// Seconds of shake when a solid brick is hit
const SHAKE_DURATION: f32 = 0.05;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Start from the menu / release the ball / leave the win screen
    pub launch: bool,
    /// Menu only: cycle levels
    pub next_level: bool,
    pub prev_level: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    match state.phase {
        GamePhase::Menu => {
            if input.next_level {
                state.select_level(state.level + 1);
            } else if input.prev_level {
                let count = state.levels.len();
                state.select_level(state.level + count - 1);
            }
            if input.launch {
                state.phase = GamePhase::Active;
                log::info!("Level {} started", state.level);
            }
        }

        GamePhase::Win => {
            if input.launch {
                state.phase = GamePhase::Menu;
            }
        }

        GamePhase::Active => {
            state.time_ticks += 1;
            process_input(state, input, dt);
            move_ball(state, dt);
            do_collisions(state);

            let expired = update_powerups(&mut state.powerups, dt, state.config.arena_height);
            for kind in expired {
                state.deactivate_powerup(kind);
            }

            state.shake_time = (state.shake_time - dt).max(0.0);

            check_ball_lost(state);
            check_level_won(state);
        }
    }
}

fn process_input(state: &mut GameState, input: &TickInput, dt: f32) {
    let step = state.config.paddle_speed * dt;
    let mut dx = 0.0;
    if input.move_left {
        dx -= step;
    }
    if input.move_right {
        dx += step;
    }

    let moved = state.paddle.slide(dx, state.config.arena_width);
    if state.ball.stuck {
        state.ball.body.center.x += moved;
    }

    if input.launch && state.ball.stuck {
        state.ball.stuck = false;
        state.events.push(GameEvent::BallLaunched);
    }
}

fn move_ball(state: &mut GameState, dt: f32) {
    if state.ball.stuck {
        return;
    }

    let ball = &mut state.ball.body;
    advance(ball, dt);
    let half_extent = Vec2::splat(ball.radius);
    let hits = state
        .bounds
        .confine(&mut ball.center, &mut ball.velocity, half_extent);
    state
        .events
        .extend(hits.into_iter().map(GameEvent::WallHit));
}

fn do_collisions(state: &mut GameState) {
    let pass_through = state.effects.pass_through;

    // Ball against every brick still standing
    let level = &mut state.levels[state.level];
    let mut destroyed_at = Vec::new();
    for (index, brick) in level.bricks.iter_mut().enumerate() {
        if !brick.is_active() {
            continue;
        }
        let hit = check_circle_rect(&state.ball.body, &brick.rect);
        if !hit.collided {
            continue;
        }

        match resolve_brick_hit(&mut state.ball.body, brick, &hit, pass_through) {
            BrickHit::Deflected => {
                state.shake_time = SHAKE_DURATION;
                state.events.push(GameEvent::BrickDeflected { index });
            }
            BrickHit::Destroyed | BrickHit::Pierced => {
                state.score += BRICK_SCORE;
                state.events.push(GameEvent::BrickDestroyed { index });
                destroyed_at.push(brick.rect.position);
            }
        }
    }

    for position in destroyed_at {
        let spawned = roll_spawns(&mut state.rng, position, &state.config);
        for powerup in spawned {
            state.events.push(GameEvent::PowerUpSpawned(powerup.kind));
            state.powerups.push(powerup);
        }
    }

    // Falling power-ups against the paddle
    for i in 0..state.powerups.len() {
        let powerup = &state.powerups[i];
        if !powerup.is_falling() || !check_rect_rect(&state.paddle.rect, &powerup.rect) {
            continue;
        }
        let kind = powerup.kind;
        let applied = state.activate_powerup(kind);
        // A blocked effect leaves nothing running to expire later
        let powerup = &mut state.powerups[i];
        powerup.destroyed = true;
        powerup.activated = applied;
    }

    // Ball against the paddle
    if state.ball.stuck {
        return;
    }
    let hit = check_circle_rect(&state.ball.body, &state.paddle.rect);
    if hit.collided {
        bounce_off_paddle(
            &mut state.ball.body,
            &state.paddle.rect,
            state.config.initial_ball_velocity,
            state.config.paddle_strength,
        );
        state.ball.stuck = state.effects.sticky;
        state.events.push(GameEvent::PaddleHit);
    }
}

fn check_ball_lost(state: &mut GameState) {
    let ball = &state.ball.body;
    if !state
        .bounds
        .below_floor(ball.center, Vec2::splat(ball.radius))
    {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::BallLost {
        lives_left: state.lives,
    });
    log::info!("Ball lost, {} lives left", state.lives);

    if state.lives == 0 {
        state.reset_level();
        state.phase = GamePhase::Menu;
        state.events.push(GameEvent::GameOver);
        log::info!("Game over");
    }
    state.reset_player();
}

fn check_level_won(state: &mut GameState) {
    if state.phase != GamePhase::Active || !state.current_level().is_completed() {
        return;
    }

    let level = state.level;
    state.reset_level();
    state.reset_player();
    state.phase = GamePhase::Win;
    state.events.push(GameEvent::LevelWon { level });
    log::info!("Level {level} cleared");
}
