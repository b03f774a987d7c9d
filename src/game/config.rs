//! Round Configuration
//!
//! Speeds, collision radius, pursuer count and play-field size. A config is
//! validated once when a round is built and never changes afterwards.

use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::{DEFAULT_COLLISION_RADIUS, DEFAULT_PURSUER_COUNT};

/// Default play-field width (pixels).
pub const DEFAULT_FIELD_WIDTH: f64 = 1024.0;

/// Default play-field height (pixels).
pub const DEFAULT_FIELD_HEIGHT: f64 = 768.0;

/// Debugging switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugOptions {
    /// Skip the movement system
    pub no_movement: bool,
    /// Skip the collision system
    pub no_collisions: bool,
    /// Skip the cleanup system
    pub no_cleanup: bool,
    /// Time each system per frame and report it through the stats
    pub profile: bool,
}

/// Configuration for a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Evader speed (pixels per millisecond, before `speed_scale`)
    pub evader_speed_factor: f64,
    /// Pursuer speed (pixels per millisecond, before `speed_scale`)
    pub pursuer_speed_factor: f64,
    /// Global speed multiplier applied to both
    pub speed_scale: f64,
    /// Distance below which two entities collide
    pub collision_radius: f64,
    /// Pursuers spawned at round start
    pub initial_pursuers: u32,
    /// Play-field width
    pub field_width: f64,
    /// Play-field height
    pub field_height: f64,
    /// Base seed for spawn layouts
    pub seed: u64,
    /// Debugging switches
    pub debug: DebugOptions,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_field(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT)
    }
}

impl GameConfig {
    /// Defaults for a `width x height` field.
    ///
    /// Speeds scale with the field diagonal so a round feels the same on
    /// any screen size.
    pub fn for_field(width: f64, height: f64) -> Self {
        Self {
            evader_speed_factor: 0.3,
            pursuer_speed_factor: 0.2,
            speed_scale: (width * width + height * height).sqrt() / 1000.0,
            collision_radius: DEFAULT_COLLISION_RADIUS,
            initial_pursuers: DEFAULT_PURSUER_COUNT,
            field_width: width,
            field_height: height,
            seed: 0,
            debug: DebugOptions::default(),
        }
    }

    /// Evader displacement for a frame of `dt` milliseconds.
    #[inline]
    pub fn evader_step(&self, dt: f64) -> f64 {
        dt * self.evader_speed_factor * self.speed_scale
    }

    /// Pursuer displacement for a frame of `dt` milliseconds.
    #[inline]
    pub fn pursuer_step(&self, dt: f64) -> f64 {
        dt * self.pursuer_speed_factor * self.speed_scale
    }

    /// Squared collision radius.
    #[inline]
    pub fn collision_radius_sq(&self) -> f64 {
        self.collision_radius * self.collision_radius
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("field_width", self.field_width), ("field_height", self.field_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }

        for (name, value) in [
            ("evader_speed_factor", self.evader_speed_factor),
            ("pursuer_speed_factor", self.pursuer_speed_factor),
            ("speed_scale", self.speed_scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidSpeed { name, value });
            }
        }

        // Per-millisecond speeds must be representable
        for (name, value) in [
            ("evader_speed_factor * speed_scale", self.evader_speed_factor * self.speed_scale),
            ("pursuer_speed_factor * speed_scale", self.pursuer_speed_factor * self.speed_scale),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidSpeed { name, value });
            }
        }

        if !self.collision_radius.is_finite() || self.collision_radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.collision_radius));
        }

        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load config from environment or use defaults.
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(width) = std::env::var("PIRANHA_FIELD_WIDTH") {
            match width.parse::<f64>() {
                Ok(parsed) if parsed.is_finite() && parsed > 0.0 => {
                    config = Self { seed: config.seed, ..Self::for_field(parsed, config.field_height) };
                }
                _ => tracing::warn!("Invalid PIRANHA_FIELD_WIDTH '{}', using default", width),
            }
        }

        if let Ok(height) = std::env::var("PIRANHA_FIELD_HEIGHT") {
            match height.parse::<f64>() {
                Ok(parsed) if parsed.is_finite() && parsed > 0.0 => {
                    config = Self { seed: config.seed, ..Self::for_field(config.field_width, parsed) };
                }
                _ => tracing::warn!("Invalid PIRANHA_FIELD_HEIGHT '{}', using default", height),
            }
        }

        if let Ok(count) = std::env::var("PIRANHA_PURSUERS") {
            if let Ok(parsed) = count.parse::<u32>() {
                config.initial_pursuers = parsed;
            } else {
                tracing::warn!("Invalid PIRANHA_PURSUERS '{}', using default", count);
            }
        }

        if let Ok(radius) = std::env::var("PIRANHA_COLLISION_RADIUS") {
            match radius.parse::<f64>() {
                Ok(parsed) if parsed.is_finite() && parsed > 0.0 => config.collision_radius = parsed,
                _ => tracing::warn!("Invalid PIRANHA_COLLISION_RADIUS '{}', using default", radius),
            }
        }

        if let Ok(seed) = std::env::var("PIRANHA_SEED") {
            if let Ok(parsed) = seed.parse::<u64>() {
                config.seed = parsed;
            } else {
                tracing::warn!("Invalid PIRANHA_SEED '{}', using default", seed);
            }
        }

        config
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config JSON is malformed.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Field dimension is not a positive finite number.
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidDimension {
        /// Offending field
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Speed factor is negative or not finite.
    #[error("{name} must be a non-negative finite number, got {value}")]
    InvalidSpeed {
        /// Offending field
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Collision radius is not a positive finite number.
    #[error("collision_radius must be a positive finite number, got {0}")]
    InvalidRadius(f64),
}
