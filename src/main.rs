//! Flappy Runner headless driver
//!
//! Runs one autopilot game at a fixed timestep and logs what happens.
//!
//! Example:
//!   RUST_LOG=debug cargo run -- --difficulty hard --seed 42 --max-seconds 30

use std::path::PathBuf;

use clap::Parser;
use flappy_runner::consts::SIM_DT;
use flappy_runner::sim::{CollisionCause, Difficulty, GameEvent, Simulation, autopilot};
use flappy_runner::{LogTelemetry, Tuning};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a headless autopilot game", long_about = None)]
struct Args {
    /// easy, normal or hard
    #[arg(long, default_value = "normal", value_parser = parse_difficulty)]
    difficulty: Difficulty,
    /// Run seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many simulated seconds
    #[arg(long, default_value_t = 60.0, value_parser = parse_duration)]
    max_seconds: f32,
    /// JSON file overriding gameplay tuning
    #[arg(long)]
    tuning: Option<PathBuf>,
}

fn parse_difficulty(label: &str) -> Result<Difficulty, String> {
    Difficulty::from_label(label)
        .ok_or_else(|| format!("unknown difficulty '{label}' (expected easy, normal or hard)"))
}

fn parse_duration(s: &str) -> Result<f32, String> {
    s.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| format!("'{s}' is not a positive number of seconds"))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let tuning = args.tuning.as_deref().map(Tuning::load).unwrap_or_default();
    if let Err(e) = tuning.validate() {
        log::error!("Invalid tuning: {}", e);
        std::process::exit(2);
    }

    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    log::info!(
        "Flappy Runner starting: difficulty={} seed={}",
        args.difficulty,
        seed
    );

    let mut sim = Simulation::with_tuning(args.difficulty, seed, tuning, LogTelemetry);
    let max_frames = (args.max_seconds / SIM_DT).ceil() as u64;

    for _ in 0..max_frames {
        let jump = autopilot::should_jump(sim.state());
        for event in sim.step(SIM_DT, jump) {
            match event {
                GameEvent::Score { total, .. } => log::info!("Score: {}", total),
                GameEvent::Collision { cause, final_score } => {
                    let what = match cause {
                        CollisionCause::Obstacle { .. } => "hit an obstacle",
                        CollisionCause::Bounds => "left the play area",
                    };
                    log::info!("Game over: {} with score {}", what, final_score);
                }
            }
        }
        if sim.is_over() {
            break;
        }
    }

    let state = sim.state();
    if !state.is_over() {
        log::info!("Time limit reached after {:.1}s", state.elapsed);
    }
    println!(
        "difficulty={} seed={} score={} distance={:.1} frames={}",
        state.difficulty, state.seed, state.score, state.player.position.x, state.frame
    );
}
