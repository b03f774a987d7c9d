//! Per-Frame Pipeline
//!
//! One frame is Movement → Cleanup → Collision → phase check, run to
//! completion. Cleanup goes before Collision so the pursuer list is dense
//! and ascending in x exactly when the pruned collision pass needs it.
//!
//! This module is clock-free: it takes a frame duration, not a timestamp.
//! `Round` owns the clock and the lifecycle around it.

use crate::game::cleanup::{run_cleanup, sort_pursuers, CleanupReport};
use crate::game::collision::{detect_collisions, CollisionReport};
use crate::game::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::input::SteeringInput;
use crate::game::movement::apply_movement;
use crate::game::render::{NullSink, RenderSink};
use crate::game::state::{Outcome, Phase, SimulationState};
use crate::game::stats::{timed, PhaseTimings};

/// Result of one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameResult {
    /// Cleanup outcome (`None` when cleanup is disabled)
    pub cleanup: Option<CleanupReport>,
    /// Collision outcome (`None` when the pass did not run)
    pub collisions: Option<CollisionReport>,
    /// Per-system timings, when profiling is on
    pub timings: Option<PhaseTimings>,
    /// The round ended during this frame
    pub ended: Option<Outcome>,
}

/// Run one frame of `dt` milliseconds on a running round.
///
/// A capture in the same frame that cleanup declared victory still counts:
/// the evader was caught, so the round ends in defeat.
pub fn run_frame(
    state: &mut SimulationState,
    config: &GameConfig,
    dt: f64,
    sink: &mut dyn RenderSink,
) -> FrameResult {
    let mut result = FrameResult::default();
    if state.phase != Phase::Running {
        return result;
    }

    let debug = config.debug;
    let mut timings = PhaseTimings::default();

    // 1. Movement
    if !debug.no_movement {
        let ((), ms) = timed(debug.profile, || apply_movement(state, config, dt, sink));
        timings.movement_ms = ms;
    }

    // 2. Cleanup
    if debug.no_cleanup {
        // Tombstones stay, but the collision pass still needs x order
        sort_pursuers(&mut state.pursuers);
    } else {
        let (report, ms) = timed(debug.profile, || run_cleanup(state));
        timings.cleanup_ms = ms;
        result.cleanup = Some(report);
    }

    // 3. Collision
    if !debug.no_collisions {
        let radius = config.collision_radius;
        let (report, ms) = timed(debug.profile, || detect_collisions(state, radius));
        timings.collision_ms = ms;
        result.collisions = Some(report);
    }

    // 4. Phase check
    if let Phase::Over(outcome) = state.phase {
        result.ended = Some(outcome);
        let left = state.live_count() as u32;
        tracing::debug!(frame = state.frame, ?outcome, pursuers_left = left, "round ended");
        state.push_event(GameEvent::round_ended(state.frame, outcome, left, state.played_ms));
    }

    if debug.profile {
        result.timings = Some(timings);
    }
    result
}

/// Replay a recorded steering sequence from a fresh round.
///
/// Frame `i` is ticked at `(i + 1) * frame_ms` with `steering_frames[i]`
/// held. Stops early once the round is over. Returns the final state and
/// every event emitted, including the opening `RoundStarted`.
pub fn replay_round(
    config: &GameConfig,
    rng_seed: u64,
    steering_frames: &[SteeringInput],
    frame_ms: f64,
) -> (SimulationState, Vec<GameEvent>) {
    let mut state = SimulationState::new(config, rng_seed, 0.0);
    state.push_event(GameEvent::round_started(0, config.initial_pursuers, rng_seed));
    let mut all_events = state.take_events();

    for (i, steering) in steering_frames.iter().enumerate() {
        state.steering = *steering;
        let dt = state.advance_clock((i + 1) as f64 * frame_ms);

        let result = run_frame(&mut state, config, dt, &mut NullSink);
        all_events.extend(state.take_events());

        if result.ended.is_some() {
            break;
        }
    }

    (state, all_events)
}
