//! Game Logic Module
//!
//! All simulation code. Deterministic for a given seed and timestamp
//! sequence.
//!
//! ## Module Structure
//!
//! - `config`: Tunables, validation, file/env loading
//! - `state`: Evader, pursuers, phase, round clock
//! - `input`: Steering vector and its pointer/keyboard adapters
//! - `movement`: Per-frame position integration
//! - `collision`: Capture and pairwise elimination (x-sorted pruning)
//! - `cleanup`: Compaction, re-sort, victory check
//! - `tick`: The per-frame pipeline and replay
//! - `round`: Lifecycle state machine driven by a scheduler
//! - `scheduler`: Host clock / frame-request boundary
//! - `render`: Render callback boundary
//! - `stats`: Score line and frame statistics
//! - `events`: Game events for logs and replays

pub mod config;
pub mod state;
pub mod input;
pub mod movement;
pub mod collision;
pub mod cleanup;
pub mod tick;
pub mod round;
pub mod scheduler;
pub mod render;
pub mod stats;
pub mod events;

// Re-export key types
pub use config::{ConfigError, DebugOptions, GameConfig};
pub use state::{Evader, Outcome, Phase, Pursuer, PursuerId, SimulationState};
pub use input::{ArrowKey, SteeringInput};
pub use round::{Round, TickOutcome};
pub use scheduler::{FrameScheduler, ManualScheduler};
pub use render::{EntityKind, NullSink, RenderSink, RenderUpdate};
pub use stats::{FrameStatistics, FrameStats, StatsObserver, StatsSummary};
pub use tick::{replay_round, run_frame, FrameResult};
pub use events::{GameEvent, GameEventData};
