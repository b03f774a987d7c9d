//! Game Events
//!
//! Events generated during simulation for renderers, logs and replays.

use serde::{Serialize, Deserialize};
use crate::core::vec2::Vec2;
use crate::game::state::{Outcome, Phase, PursuerId};

/// Priority for event processing order.
///
/// Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// The evader being caught ends everything else
    Capture = 0,
    /// Then pursuer pairs
    Elimination = 1,
    /// Then lifecycle changes
    Lifecycle = 2,
    /// Lowest priority
    Other = 255,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A new round began
    RoundStarted {
        /// Pursuers spawned
        pursuers: u32,
        /// Spawn seed
        rng_seed: u64,
    },

    /// A pursuer reached the evader
    EvaderCaught {
        /// The catcher
        pursuer_id: PursuerId,
        /// Where the catcher was
        position: Vec2,
    },

    /// Two pursuers collided and were both removed
    PursuersEliminated {
        /// Lower-x pursuer of the pair
        first: PursuerId,
        /// Higher-x pursuer of the pair
        second: PursuerId,
        /// Midpoint of the pair
        position: Vec2,
    },

    /// Round phase changed
    PhaseChanged {
        /// Phase before
        old_phase: Phase,
        /// Phase after
        new_phase: Phase,
    },

    /// Round ended
    RoundEnded {
        /// How it ended
        outcome: Outcome,
        /// Live pursuers at the end
        pursuers_left: u32,
        /// Final score (ms played)
        played_ms: f64,
    },
}

/// A game event with timing and priority.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame when event occurred
    pub frame: u32,

    /// Processing priority
    pub priority: EventPriority,

    /// Pursuer involved (for tie-breaking)
    pub pursuer_id: Option<PursuerId>,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(frame: u32, priority: EventPriority, data: GameEventData) -> Self {
        let pursuer_id = match &data {
            GameEventData::EvaderCaught { pursuer_id, .. } => Some(*pursuer_id),
            GameEventData::PursuersEliminated { first, .. } => Some(*first),
            _ => None,
        };

        Self {
            frame,
            priority,
            pursuer_id,
            data,
        }
    }

    /// Create round started event.
    pub fn round_started(frame: u32, pursuers: u32, rng_seed: u64) -> Self {
        Self::new(frame, EventPriority::Lifecycle, GameEventData::RoundStarted { pursuers, rng_seed })
    }

    /// Create evader caught event.
    pub fn evader_caught(frame: u32, pursuer_id: PursuerId, position: Vec2) -> Self {
        Self::new(
            frame,
            EventPriority::Capture,
            GameEventData::EvaderCaught { pursuer_id, position },
        )
    }

    /// Create pursuers eliminated event. `position` is the midpoint of the pair.
    pub fn pursuers_eliminated(frame: u32, first: PursuerId, second: PursuerId, position: Vec2) -> Self {
        Self::new(
            frame,
            EventPriority::Elimination,
            GameEventData::PursuersEliminated { first, second, position },
        )
    }

    /// Create phase changed event.
    pub fn phase_changed(frame: u32, old_phase: Phase, new_phase: Phase) -> Self {
        Self::new(
            frame,
            EventPriority::Lifecycle,
            GameEventData::PhaseChanged { old_phase, new_phase },
        )
    }

    /// Create round ended event.
    pub fn round_ended(frame: u32, outcome: Outcome, pursuers_left: u32, played_ms: f64) -> Self {
        Self::new(
            frame,
            EventPriority::Other,
            GameEventData::RoundEnded { outcome, pursuers_left, played_ms },
        )
    }
}

impl PartialEq for GameEvent {
    fn eq(&self, other: &Self) -> bool {
        self.frame == other.frame
            && self.priority == other.priority
            && self.pursuer_id == other.pursuer_id
    }
}

impl Eq for GameEvent {}

impl PartialOrd for GameEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GameEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: frame, then priority, then pursuer id
        self.frame
            .cmp(&other.frame)
            .then(self.priority.cmp(&other.priority))
            .then(self.pursuer_id.cmp(&other.pursuer_id))
    }
}
