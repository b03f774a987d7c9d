//! Steering Input
//!
//! The evader's desired direction. Input collaborators decode keyboard or
//! pointer events into a [`SteeringInput`] and hand it to the round; the
//! movement system only ever reads it.

use serde::{Serialize, Deserialize};
use crate::core::geometry::normalize_and_scale;
use crate::core::vec2::Vec2;

/// Arrow keys understood by [`SteeringInput::with_key`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowKey {
    /// Towards y = 0
    Up,
    /// Towards y = height
    Down,
    /// Towards x = 0
    Left,
    /// Towards x = width
    Right,
}

/// Unit-or-zero steering vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SteeringInput {
    /// X direction component
    pub dx: f64,
    /// Y direction component
    pub dy: f64,
}

impl SteeringInput {
    /// No steering: the evader stays put.
    pub const STILL: Self = Self { dx: 0.0, dy: 0.0 };

    /// Create from components.
    ///
    /// The caller guarantees `(dx, dy)` is a unit vector or zero.
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Pointer steering: head from `evader` toward `pointer`.
    ///
    /// Returns `None` when the pointer sits on the evader, in which case
    /// the previous steering should be kept.
    pub fn toward(evader: Vec2, pointer: Vec2) -> Option<Self> {
        normalize_and_scale(pointer.x - evader.x, pointer.y - evader.y, 1.0)
            .map(|v| Self::new(v.x, v.y))
    }

    /// Keyboard steering: press `key` on top of the current direction.
    ///
    /// Only the key's axis changes, and only when it does not already point
    /// that way. The result is renormalized so diagonals stay unit length.
    pub fn with_key(self, key: ArrowKey) -> Self {
        let (mut dx, mut dy) = (self.dx, self.dy);
        match key {
            ArrowKey::Up if dy >= 0.0 => dy = -1.0,
            ArrowKey::Down if dy <= 0.0 => dy = 1.0,
            ArrowKey::Left if dx >= 0.0 => dx = -1.0,
            ArrowKey::Right if dx <= 0.0 => dx = 1.0,
            _ => return self,
        }
        normalize_and_scale(dx, dy, 1.0)
            .map(|v| Self::new(v.x, v.y))
            .unwrap_or(Self::STILL)
    }

    /// Is this the zero vector?
    #[inline]
    pub fn is_still(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}
