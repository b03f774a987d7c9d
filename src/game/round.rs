//! Round Lifecycle
//!
//! [`Round`] owns one game: configuration, simulation state, the host's
//! scheduler and the optional renderer and statistics observer. It is the
//! state machine around the per-frame pipeline:
//!
//! ```text
//! Running --pause / focus lost--> Paused --resume--> Running
//! Running --capture--> Over(Defeat)
//! Running --swarm reduced to <= 1--> Over(Victory)
//! Over(*) --restart--> Running
//! ```
//!
//! Calls that make no sense in the current phase are no-ops.

use std::time::Instant;
use tracing::{debug, info};

use crate::core::rng::derive_round_seed;
use crate::core::vec2::Vec2;
use crate::game::config::{ConfigError, GameConfig};
use crate::game::events::GameEvent;
use crate::game::input::SteeringInput;
use crate::game::render::{RenderSink, RenderUpdate};
use crate::game::scheduler::FrameScheduler;
use crate::game::state::{Outcome, Phase, SimulationState};
use crate::game::stats::{FrameStatistics, FrameStats, PhaseTimings, StatsObserver};
use crate::game::tick::run_frame;

/// What a call to [`Round::tick`] did.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    /// Phase after the tick
    pub phase: Phase,
    /// Frames simulated so far this round
    pub frame: u32,
    /// Play time so far (ms)
    pub played_ms: f64,
    /// Resolved positions of every entity that moved
    pub moved: Vec<RenderUpdate>,
    /// Set while the round is over
    pub outcome: Option<Outcome>,
    /// Terminal message to display, while the round is over
    pub message: Option<&'static str>,
    /// Events emitted since the previous tick
    pub events: Vec<GameEvent>,
    /// Another tick was requested from the scheduler
    pub rescheduled: bool,
}

/// One game, from start to restart.
pub struct Round<S: FrameScheduler> {
    config: GameConfig,
    state: SimulationState,
    scheduler: S,
    rounds_started: u32,
    renderer: Option<Box<dyn RenderSink>>,
    stats_observer: Option<Box<dyn StatsObserver>>,
    statistics: FrameStatistics,
}

impl<S: FrameScheduler> Round<S> {
    /// Validate `config` and start the first round.
    pub fn new(config: GameConfig, scheduler: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let now = scheduler.now();

        let mut round = Self {
            state: SimulationState::with_layout(Vec2::ZERO, Vec::new(), now),
            statistics: FrameStatistics::new(now),
            config,
            scheduler,
            rounds_started: 0,
            renderer: None,
            stats_observer: None,
        };
        round.start();
        Ok(round)
    }

    /// Start from a prepared state instead of a seeded spawn.
    pub fn with_state(config: GameConfig, scheduler: S, state: SimulationState) -> Result<Self, ConfigError> {
        config.validate()?;
        let now = scheduler.now();

        let mut round = Self {
            state,
            statistics: FrameStatistics::new(now),
            config,
            scheduler,
            rounds_started: 1,
            renderer: None,
            stats_observer: None,
        };
        round.state.rebase_clock(now);
        round.announce_start();
        Ok(round)
    }

    /// Begin a fresh round: evader centred, new pursuer batch, counters
    /// zeroed. Each round gets its own seed derived from the configured one.
    pub fn start(&mut self) {
        let seed = derive_round_seed(self.config.seed, self.rounds_started);
        self.rounds_started += 1;

        let now = self.scheduler.now();
        self.state = SimulationState::new(&self.config, seed, now);
        self.statistics.reset(now);
        self.announce_start();
    }

    fn announce_start(&mut self) {
        let pursuers = self.state.live_count() as u32;
        info!(round = self.rounds_started, seed = self.state.rng_seed, pursuers, "round started");

        self.state.push_event(GameEvent::round_started(self.state.frame, pursuers, self.state.rng_seed));
        self.scheduler.request_next_tick();
    }

    /// Start over after the round has ended. Ignored otherwise.
    pub fn restart(&mut self) {
        if !self.state.is_over() {
            debug!(phase = ?self.state.phase, "restart ignored, round not over");
            return;
        }
        self.start();
    }

    /// Explicit pause request.
    pub fn pause(&mut self) {
        if self.state.phase != Phase::Running {
            debug!(phase = ?self.state.phase, "pause ignored");
            return;
        }
        self.set_phase(Phase::Paused);
        self.scheduler.cancel_tick();
        info!(frame = self.state.frame, played_ms = self.state.played_ms, "round paused");
    }

    /// The game lost input focus.
    pub fn focus_lost(&mut self) {
        self.pause();
    }

    /// Resume a paused round. The paused span does not count as play.
    pub fn resume(&mut self) {
        if self.state.phase != Phase::Paused {
            debug!(phase = ?self.state.phase, "resume ignored");
            return;
        }
        let now = self.scheduler.now();
        self.state.rebase_clock(now);
        self.set_phase(Phase::Running);
        self.scheduler.request_next_tick();
        info!(frame = self.state.frame, "round resumed");
    }

    /// Pause when running, resume when paused.
    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Over(_) => debug!("toggle ignored, round over"),
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        let old = self.state.phase;
        self.state.phase = phase;
        self.state.push_event(GameEvent::phase_changed(self.state.frame, old, phase));
    }

    /// Set the evader's steering. `(dx, dy)` must be a unit vector or zero.
    pub fn set_steering(&mut self, dx: f64, dy: f64) {
        self.state.steering = SteeringInput::new(dx, dy);
    }

    /// Current steering.
    pub fn steering(&self) -> SteeringInput {
        self.state.steering
    }

    /// Advance the round to `timestamp` (ms, on the scheduler's clock).
    pub fn tick(&mut self, timestamp: f64) -> TickOutcome {
        match self.state.phase {
            Phase::Running => {}
            Phase::Paused => return self.idle_outcome(),
            Phase::Over(outcome) => {
                let mut idle = self.idle_outcome();
                idle.outcome = Some(outcome);
                idle.message = Some(outcome.message());
                return idle;
            }
        }

        let started = Instant::now();
        let dt = self.state.advance_clock(timestamp);

        let mut moved: Vec<RenderUpdate> = Vec::new();
        let result = run_frame(&mut self.state, &self.config, dt, &mut moved);
        let work_ms = started.elapsed().as_secs_f64() * 1000.0;

        if let Some(renderer) = self.renderer.as_mut() {
            for update in &moved {
                renderer.entity_moved(update.kind, update.position);
            }
        }
        self.report_stats(timestamp, work_ms, result.timings);

        let rescheduled = self.state.phase == Phase::Running;
        if rescheduled {
            self.scheduler.request_next_tick();
        } else if let Some(outcome) = result.ended {
            info!(
                round = self.rounds_started,
                ?outcome,
                frame = self.state.frame,
                score = self.state.played_ms.round(),
                "round over"
            );
        }

        TickOutcome {
            phase: self.state.phase,
            frame: self.state.frame,
            played_ms: self.state.played_ms,
            moved,
            outcome: result.ended,
            message: result.ended.map(Outcome::message),
            events: self.state.take_events(),
            rescheduled,
        }
    }

    fn idle_outcome(&mut self) -> TickOutcome {
        TickOutcome {
            phase: self.state.phase,
            frame: self.state.frame,
            played_ms: self.state.played_ms,
            moved: Vec::new(),
            outcome: None,
            message: None,
            events: self.state.take_events(),
            rescheduled: false,
        }
    }

    fn report_stats(&mut self, timestamp: f64, work_ms: f64, timings: Option<PhaseTimings>) {
        let stats = FrameStats {
            frame: self.state.frame,
            timestamp,
            frame_duration_ms: self.state.frame_duration,
            played_ms: self.state.played_ms,
            pursuers_remaining: self.state.live_count(),
            work_ms,
            timings,
        };

        let summary = self.statistics.record(timestamp, &stats);
        if let Some(observer) = self.stats_observer.as_mut() {
            observer.on_frame(&stats);
            if let Some(summary) = &summary {
                observer.on_summary(summary);
            }
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Install the render callback.
    pub fn set_renderer(&mut self, renderer: Box<dyn RenderSink>) {
        self.renderer = Some(renderer);
    }

    /// Install the statistics callback.
    pub fn set_stats_observer(&mut self, observer: Box<dyn StatsObserver>) {
        self.stats_observer = Some(observer);
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Simulation state (read-only).
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Configuration in force.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The host scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The host scheduler (mutable, e.g. to drive a synthetic clock).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Rounds started so far, counting the current one.
    pub fn round_number(&self) -> u32 {
        self.rounds_started
    }

    /// Score line for display.
    pub fn score_text(&self) -> String {
        self.statistics.score_text(self.state.played_ms, self.config.debug.profile)
    }
}
