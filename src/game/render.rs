//! Render Boundary
//!
//! The simulation reports every resolved position through a [`RenderSink`].
//! How (or whether) anything is drawn is up to the sink.

use serde::{Serialize, Deserialize};
use crate::core::vec2::Vec2;
use crate::game::state::PursuerId;

/// Which entity moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player
    Evader,
    /// A pursuer, by id
    Pursuer(PursuerId),
}

/// A resolved (post-clamp) position for one entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderUpdate {
    /// Entity that moved
    pub kind: EntityKind,
    /// Where it ended up
    pub position: Vec2,
}

/// Render callback, invoked once per moved entity per tick.
pub trait RenderSink {
    /// `kind` now sits at `position`.
    fn entity_moved(&mut self, kind: EntityKind, position: Vec2);
}

impl RenderSink for Vec<RenderUpdate> {
    fn entity_moved(&mut self, kind: EntityKind, position: Vec2) {
        self.push(RenderUpdate { kind, position });
    }
}

/// Sink that drops everything (headless runs, replays).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn entity_moved(&mut self, _kind: EntityKind, _position: Vec2) {}
}
