//! # Piranha Swarm
//!
//! Simulation core for a single-screen pursuit game: one evader, a swarm of
//! pursuers that eliminate each other on contact. The evader loses when
//! caught and wins once at most one pursuer is left.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PIRANHA SWARM                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── geometry.rs - clamp, normalize-and-scale                │
//! │  ├── vec2.rs     - 2D f64 vector                             │
//! │  ├── rng.rs      - Seeded Xorshift128+ spawn placement       │
//! │  └── hash.rs     - State hashing for replay verification     │
//! │                                                              │
//! │  game/           - Simulation                                │
//! │  ├── config.rs   - Tunables, JSON / env loading              │
//! │  ├── state.rs    - Evader, pursuers, phase, clock            │
//! │  ├── movement.rs - Position integration                      │
//! │  ├── cleanup.rs  - Compaction, x-sort, victory check         │
//! │  ├── collision.rs- Capture + pruned pairwise elimination     │
//! │  ├── tick.rs     - Per-frame pipeline, replay                │
//! │  ├── round.rs    - Run / pause / over state machine          │
//! │  └── ...         - input, scheduler, render, stats, events   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame Order
//!
//! Each tick runs Movement → Cleanup → Collision → phase check to
//! completion. Cleanup leaves the pursuer list ascending in x, which is
//! what lets the collision pass stop scanning early.
//!
//! ## Determinism
//!
//! Given the same configuration, seed and timestamp sequence, a round
//! produces the same positions, events and state hash. The host supplies
//! time through a [`game::FrameScheduler`]; nothing in the simulation
//! reads the system clock (profiling timings aside, which are reported but
//! never fed back).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use core::vec2::Vec2;
pub use core::rng::DeterministicRng;
pub use game::config::{ConfigError, GameConfig};
pub use game::round::{Round, TickOutcome};
pub use game::state::{Outcome, Phase, SimulationState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default collision radius (px)
pub const DEFAULT_COLLISION_RADIUS: f64 = 29.0;

/// Default pursuers per round
pub const DEFAULT_PURSUER_COUNT: u32 = 18;
