//! Geometry Primitives
//!
//! Clamping and steering-vector normalization shared by every system.

use super::vec2::Vec2;

/// Displacements whose norm is at or below this are treated as "no signal".
pub const NORMALIZE_EPSILON: f64 = 0.01;

/// Return the value in `[min, max]` closest to `value`.
///
/// `min` wins when `value <= min`, `max` wins when `value >= max`.
/// NaN maps to `min`.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() || value <= min {
        return min;
    }
    if value >= max {
        return max;
    }
    value
}

/// Rescale `(dx, dy)` to length `magnitude`.
///
/// Returns `None` for an (effectively) zero displacement, and for any
/// input that would produce a NaN component.
#[inline]
pub fn normalize_and_scale(dx: f64, dy: f64, magnitude: f64) -> Option<Vec2> {
    let norm = (dx * dx + dy * dy).sqrt();
    if norm.is_nan() || norm <= NORMALIZE_EPSILON {
        return None;
    }

    let x = dx / norm * magnitude;
    if x.is_nan() {
        return None;
    }
    let y = dy / norm * magnitude;
    if y.is_nan() {
        return None;
    }

    Some(Vec2::new(x, y))
}
