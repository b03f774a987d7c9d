//! Simulation State Definitions
//!
//! The evader, the pursuer swarm and the per-round clock.

use std::cmp::Ordering;
use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::core::rng::DeterministicRng;
use crate::core::hash::{StateHash, compute_state_hash};
use crate::game::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::input::SteeringInput;

// =============================================================================
// ENTITIES
// =============================================================================

/// The player-controlled entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evader {
    /// Current position
    pub position: Vec2,
    /// False once a pursuer has caught it
    pub alive: bool,
}

impl Evader {
    /// Create a live evader.
    pub fn new(position: Vec2) -> Self {
        Self { position, alive: true }
    }
}

/// Pursuer identifier, unique within a round.
pub type PursuerId = u32;

/// An AI-controlled entity steering toward the evader.
///
/// Liveness is membership in [`SimulationState::pursuers`]; an eliminated
/// pursuer leaves a `None` slot until cleanup compacts the list.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pursuer {
    /// Spawn-order identifier
    pub id: PursuerId,
    /// Current position
    pub position: Vec2,
}

impl Pursuer {
    /// Create a pursuer.
    pub fn new(id: PursuerId, position: Vec2) -> Self {
        Self { id, position }
    }
}

/// Ascending-x ordering for pursuer slots.
///
/// Three-way numeric comparison on x, ties broken by id; empty slots sort
/// after every live pursuer.
pub fn slot_order(a: &Option<Pursuer>, b: &Option<Pursuer>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a
            .position
            .x
            .total_cmp(&b.position.x)
            .then(a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// =============================================================================
// PHASE
// =============================================================================

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// At most one pursuer left
    Victory,
    /// The evader was caught
    Defeat,
}

impl Outcome {
    /// Terminal message shown by the renderer.
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Victory => "Victory! The swarm devoured itself.",
            Outcome::Defeat => "Game over, you were caught! :(",
        }
    }
}

/// Current phase of the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Phase {
    /// Ticks advance the simulation
    #[default]
    Running,
    /// Ticks are no-ops until resumed
    Paused,
    /// Round finished; only a restart leaves this phase
    Over(Outcome),
}

impl Phase {
    /// Round has finished.
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Over(_))
    }

    fn tag(self) -> u8 {
        match self {
            Phase::Running => 0,
            Phase::Paused => 1,
            Phase::Over(Outcome::Victory) => 2,
            Phase::Over(Outcome::Defeat) => 3,
        }
    }
}

// =============================================================================
// SIMULATION STATE
// =============================================================================

/// Complete state of one round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationState {
    /// The player
    pub evader: Evader,

    /// Live pursuers, ascending by x after every cleanup.
    /// `None` marks a pursuer eliminated during the current frame.
    pub pursuers: Vec<Option<Pursuer>>,

    /// Current steering direction (unit-or-zero)
    pub steering: SteeringInput,

    /// Current phase
    pub phase: Phase,

    /// Frames simulated this round
    pub frame: u32,

    /// Timestamp of the previous tick (ms)
    pub last_timestamp: f64,

    /// Duration of the most recent frame (ms)
    pub frame_duration: f64,

    /// Time actually played, paused spans excluded (ms)
    pub played_ms: f64,

    /// Spawn seed (for verification)
    pub rng_seed: u64,

    /// Events generated this tick (cleared each tick)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl SimulationState {
    /// Fresh round: evader at the centre, `initial_pursuers` spawned away
    /// from it, clock starting at `now`.
    pub fn new(config: &GameConfig, rng_seed: u64, now: f64) -> Self {
        let mut rng = DeterministicRng::new(rng_seed);
        let pursuers = (0..config.initial_pursuers)
            .map(|id| {
                let position = rng.spawn_position(config.field_width, config.field_height);
                Pursuer::new(id, position)
            })
            .collect();

        let center = Vec2::new(config.field_width / 2.0, config.field_height / 2.0);
        let mut state = Self::with_layout(center, pursuers, now);
        state.rng_seed = rng_seed;
        state
    }

    /// Round with an explicit layout. Pursuers are sorted on entry.
    pub fn with_layout(evader: Vec2, pursuers: Vec<Pursuer>, now: f64) -> Self {
        let mut pursuers: Vec<Option<Pursuer>> = pursuers.into_iter().map(Some).collect();
        pursuers.sort_by(slot_order);

        Self {
            evader: Evader::new(evader),
            pursuers,
            steering: SteeringInput::STILL,
            phase: Phase::Running,
            frame: 0,
            last_timestamp: now,
            frame_duration: 0.0,
            played_ms: 0.0,
            rng_seed: 0,
            pending_events: Vec::new(),
        }
    }

    /// Iterate over live pursuers.
    pub fn live_pursuers(&self) -> impl Iterator<Item = &Pursuer> {
        self.pursuers.iter().flatten()
    }

    /// Number of live pursuers.
    pub fn live_count(&self) -> usize {
        self.pursuers.iter().filter(|slot| slot.is_some()).count()
    }

    /// Look up a live pursuer by id.
    pub fn pursuer(&self, id: PursuerId) -> Option<&Pursuer> {
        self.live_pursuers().find(|p| p.id == id)
    }

    /// Mark the pursuer in `index` eliminated.
    ///
    /// The slot is emptied but kept so indices stay stable for the rest of
    /// the collision pass.
    pub fn eliminate(&mut self, index: usize) -> Option<Pursuer> {
        self.pursuers.get_mut(index).and_then(Option::take)
    }

    /// Advance the clock to `timestamp`, returning the frame duration.
    ///
    /// A timestamp that is not finite or runs backwards yields a zero-length
    /// frame; a backwards one still becomes the new reference.
    pub fn advance_clock(&mut self, timestamp: f64) -> f64 {
        if !timestamp.is_finite() {
            self.frame_duration = 0.0;
            self.frame += 1;
            return 0.0;
        }
        let duration = (timestamp - self.last_timestamp).max(0.0);
        self.last_timestamp = timestamp;
        self.frame_duration = duration;
        self.frame += 1;
        self.played_ms += duration;
        duration
    }

    /// Move the clock reference to `now` without counting the gap as play.
    pub fn rebase_clock(&mut self, now: f64) {
        self.last_timestamp = now;
    }

    /// Is the round over?
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.frame, self.rng_seed, |hasher| {
            hasher.update_vec2(self.evader.position);
            hasher.update_bool(self.evader.alive);
            hasher.update_u8(self.phase.tag());
            hasher.update_u32(self.live_count() as u32);

            for pursuer in self.live_pursuers() {
                hasher.update_u32(pursuer.id);
                hasher.update_vec2(pursuer.position);
            }

            hasher.update_f64(self.played_ms);
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
