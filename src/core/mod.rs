//! Core deterministic primitives.
//!
//! Geometry, seeded randomness and state hashing. Nothing in here knows
//! about evaders or pursuers.

pub mod geometry;
pub mod vec2;
pub mod rng;
pub mod hash;

// Re-export core types
pub use geometry::{clamp, normalize_and_scale, NORMALIZE_EPSILON};
pub use vec2::Vec2;
pub use rng::DeterministicRng;
pub use hash::compute_state_hash;
