//! Piranha Swarm headless demo
//!
//! Plays one round on a synthetic 60 Hz clock with scripted steering, then
//! replays the same steering and checks the state hashes match.
//!
//! Usage: `piranha-swarm [config.json]`. Without a file, defaults are read
//! with `PIRANHA_*` environment overrides.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use piranha_swarm::{
    VERSION,
    game::{
        config::GameConfig,
        events::GameEventData,
        input::SteeringInput,
        round::Round,
        scheduler::ManualScheduler,
        tick::replay_round,
    },
};

/// Synthetic frame interval (ms)
const FRAME_MS: f64 = 16.0;

/// Give up after this many frames
const MAX_FRAMES: usize = 60 * 120;

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Piranha Swarm v{}", VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading config from {}", path))?,
        None => GameConfig::load_or_default(),
    };
    info!(
        "Field {}x{}, {} pursuers, radius {}, seed {}",
        config.field_width, config.field_height, config.initial_pursuers, config.collision_radius, config.seed
    );

    demo_round(config)
}

/// Steering for frame `t`: a slow circle, so the evader keeps drawing the
/// swarm into itself.
fn scripted_steering(t: usize) -> SteeringInput {
    let angle = t as f64 * 0.02;
    SteeringInput::new(angle.cos(), angle.sin())
}

fn demo_round(config: GameConfig) -> anyhow::Result<()> {
    info!("=== Starting Demo Round ===");

    let mut round = Round::new(config.clone(), ManualScheduler::new(0.0))?;
    let seed = round.state().rng_seed;
    info!("Round seed: {}", seed);

    let mut steering = Vec::new();

    for t in 0..MAX_FRAMES {
        if !round.scheduler_mut().take_request() {
            break;
        }

        let input = scripted_steering(t);
        round.set_steering(input.dx, input.dy);
        steering.push(input);

        let now = round.scheduler_mut().advance(FRAME_MS);
        let outcome = round.tick(now);

        for event in &outcome.events {
            match &event.data {
                GameEventData::PursuersEliminated { first, second, position } => {
                    info!("Frame {}: pursuers {} and {} collided at {}", event.frame, first, second, position);
                }
                GameEventData::EvaderCaught { pursuer_id, .. } => {
                    info!("Frame {}: caught by pursuer {}", event.frame, pursuer_id);
                }
                GameEventData::RoundEnded { outcome, pursuers_left, .. } => {
                    info!("Round ended: {:?} with {} pursuers left", outcome, pursuers_left);
                }
                _ => {}
            }
        }

        if let Some(message) = outcome.message {
            info!("{}", message);
        }
    }

    // Print final results
    info!("=== Round Results ===");
    info!("{}", round.score_text());
    info!("Frames: {}", round.state().frame);
    let hash = round.state().compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let (replayed, events) = replay_round(&config, seed, &steering, FRAME_MS);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {} ({} events)", hex::encode(replay_hash), events.len());

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    Ok(())
}
