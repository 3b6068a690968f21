//! Breakout core entry point
//!
//! Headless runners for the simulation: the bounce-and-settle toy and an
//! autoplayed Breakout session. A windowed host would drive the same
//! `tick` and draw `render_list` instead.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use breakout_core::consts::SIM_DT;
use breakout_core::sim::{BouncingBody, GameEvent, GamePhase, GameState, Level, TickInput, tick};
use breakout_core::{BounceConfig, PhysicsConfig};

#[derive(Parser, Debug)]
#[command(about = "Headless Breakout physics runner", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drop a body onto the floor and watch it settle
    Bounce {
        #[arg(long, default_value_t = 4.0)]
        height: f32,
        #[arg(long, default_value_t = 5.0)]
        velocity: f32,
        #[arg(long, default_value_t = 0.45)]
        restitution: f32,
        /// Give up after this many simulated seconds
        #[arg(long, default_value_t = 60.0)]
        max_seconds: f32,
    },
    /// Autoplay a Breakout level for a number of ticks
    Breakout {
        /// JSON physics config (defaults otherwise)
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 3600)]
        ticks: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Built-in layout, top half of the arena
const STANDARD_LEVEL: [[u8; 15]; 8] = [
    [5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5],
    [5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5],
    [4, 4, 4, 4, 4, 0, 0, 0, 0, 0, 4, 4, 4, 4, 4],
    [4, 1, 4, 1, 4, 0, 0, 1, 0, 0, 4, 1, 4, 1, 4],
    [3, 3, 3, 3, 3, 0, 0, 0, 0, 0, 3, 3, 3, 3, 3],
    [3, 3, 1, 3, 3, 3, 3, 3, 3, 3, 3, 3, 1, 3, 3],
    [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
    [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
];

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Bounce {
            height,
            velocity,
            restitution,
            max_seconds,
        } => run_bounce(height, velocity, restitution, max_seconds),
        Command::Breakout {
            config,
            ticks,
            seed,
        } => run_breakout(config, ticks, seed),
    }
}

fn run_bounce(height: f32, velocity: f32, restitution: f32, max_seconds: f32) -> Result<()> {
    let config = BounceConfig {
        initial_height: height,
        initial_velocity: velocity,
        restitution,
        ..Default::default()
    };
    config.check()?;
    let mut body = BouncingBody::new(config);

    let mut elapsed = 0.0;
    while !body.is_at_rest() && elapsed < max_seconds {
        if body.step(SIM_DT) {
            println!(
                "t={elapsed:6.3}s bounce {:>2} rebound {:.3} m/s",
                body.bounces, body.velocity
            );
        }
        elapsed += SIM_DT;
    }

    if body.is_at_rest() {
        println!("At rest after {} bounces ({elapsed:.2}s)", body.bounces);
    } else {
        println!("Still moving after {max_seconds}s");
    }
    Ok(())
}

fn run_breakout(config_path: Option<PathBuf>, ticks: u32, seed: Option<u64>) -> Result<()> {
    let mut config = match config_path {
        Some(path) => PhysicsConfig::load(path)?,
        None => PhysicsConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let tiles: Vec<Vec<u8>> = STANDARD_LEVEL.iter().map(|row| row.to_vec()).collect();
    let Some(level) = Level::from_tiles(&tiles, config.arena_width, config.arena_height / 2.0)
    else {
        bail!("built-in level grid is malformed");
    };
    let mut state = GameState::new(config, vec![level]);

    let mut destroyed = 0usize;
    let mut lost = 0usize;
    for _ in 0..ticks {
        let input = autopilot(&state);
        tick(&mut state, &input, SIM_DT);

        for event in &state.events {
            match event {
                GameEvent::BrickDestroyed { .. } => destroyed += 1,
                GameEvent::BallLost { .. } => lost += 1,
                GameEvent::LevelWon { .. } => println!("Level cleared at tick {}", state.time_ticks),
                _ => {}
            }
        }
    }

    println!(
        "{} ticks: {destroyed} bricks destroyed, {lost} balls lost, score {}, {} bricks left, {} lives",
        ticks,
        state.score,
        state.current_level().remaining(),
        state.lives
    );
    Ok(())
}

/// Follow the ball with the paddle and launch whenever possible
fn autopilot(state: &GameState) -> TickInput {
    let target = state.ball.body.center.x;
    let paddle_center = state.paddle.rect.center().x;
    let dead_zone = state.paddle.rect.size.x * 0.2;

    TickInput {
        move_left: !state.ball.stuck && target < paddle_center - dead_zone,
        move_right: !state.ball.stuck && target > paddle_center + dead_zone,
        launch: state.ball.stuck || state.phase != GamePhase::Active,
        ..Default::default()
    }
}
