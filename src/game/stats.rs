//! Score & Frame Statistics
//!
//! Purely observational: nothing here feeds back into the simulation.

use std::fmt;
use std::time::Instant;
use serde::{Serialize, Deserialize};

/// Length of a statistics window (ms).
pub const STATS_WINDOW_MS: f64 = 1000.0;

/// Wall time spent in each system during one frame (ms).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseTimings {
    /// Movement system
    pub movement_ms: f64,
    /// Cleanup system
    pub cleanup_ms: f64,
    /// Collision system
    pub collision_ms: f64,
}

/// Run `f`, timing it when `enabled`.
pub(crate) fn timed<T>(enabled: bool, f: impl FnOnce() -> T) -> (T, f64) {
    if !enabled {
        return (f(), 0.0);
    }
    let start = Instant::now();
    let value = f();
    (value, start.elapsed().as_secs_f64() * 1000.0)
}

/// Per-tick data handed to a [`StatsObserver`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    /// Frame number within the round
    pub frame: u32,
    /// Tick timestamp (ms)
    pub timestamp: f64,
    /// Simulated frame duration (ms)
    pub frame_duration_ms: f64,
    /// Accumulated play time, which is also the score (ms)
    pub played_ms: f64,
    /// Live pursuers after the frame
    pub pursuers_remaining: usize,
    /// Wall time spent simulating this frame (ms)
    pub work_ms: f64,
    /// Per-system timings, when profiling is on
    pub timings: Option<PhaseTimings>,
}

/// Averages over one statistics window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Frames per second over the window
    pub fps: f64,
    /// Average simulation work per frame (ms)
    pub avg_work_ms: f64,
    /// Average per-system timings, when profiling is on
    pub avg_timings: Option<PhaseTimings>,
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}fps, {}user, ", self.fps.round(), round2(self.avg_work_ms))?;
        if let Some(t) = self.avg_timings {
            write!(
                f,
                "{}mov, {}clean, {}coll, ",
                round2(t.movement_ms),
                round2(t.cleanup_ms),
                round2(t.collision_ms),
            )?;
        }
        Ok(())
    }
}

fn round2(x: f64) -> f64 {
    (100.0 * x).round() / 100.0
}

/// Receives per-tick statistics.
pub trait StatsObserver {
    /// Called after every simulated tick.
    fn on_frame(&mut self, stats: &FrameStats);

    /// Called when a statistics window closes.
    fn on_summary(&mut self, _summary: &StatsSummary) {}
}

/// Rolling one-second statistics window.
#[derive(Clone, Debug, Default)]
pub struct FrameStatistics {
    window_start: f64,
    frames: u32,
    work_ms: f64,
    timings: PhaseTimings,
    profiled: bool,
    last_summary: Option<StatsSummary>,
}

impl FrameStatistics {
    /// Empty window starting at `now`.
    pub fn new(now: f64) -> Self {
        Self {
            window_start: now,
            ..Self::default()
        }
    }

    /// Start over (new round).
    pub fn reset(&mut self, now: f64) {
        *self = Self::new(now);
    }

    /// Record a frame. Returns a summary when the window closes.
    ///
    /// A non-finite `now` still counts the frame but cannot close the
    /// window.
    pub fn record(&mut self, now: f64, stats: &FrameStats) -> Option<StatsSummary> {
        self.frames += 1;
        self.work_ms += stats.work_ms;
        if let Some(t) = stats.timings {
            self.profiled = true;
            self.timings.movement_ms += t.movement_ms;
            self.timings.cleanup_ms += t.cleanup_ms;
            self.timings.collision_ms += t.collision_ms;
        }

        if !now.is_finite() {
            return None;
        }
        let elapsed = now - self.window_start;
        if elapsed <= STATS_WINDOW_MS {
            return None;
        }

        let n = self.frames as f64;
        let summary = StatsSummary {
            fps: STATS_WINDOW_MS * n / elapsed,
            avg_work_ms: self.work_ms / n,
            avg_timings: self.profiled.then(|| PhaseTimings {
                movement_ms: self.timings.movement_ms / n,
                cleanup_ms: self.timings.cleanup_ms / n,
                collision_ms: self.timings.collision_ms / n,
            }),
        };

        *self = Self {
            window_start: now,
            last_summary: Some(summary),
            ..Self::default()
        };
        Some(summary)
    }

    /// Most recent closed window.
    pub fn last_summary(&self) -> Option<StatsSummary> {
        self.last_summary
    }

    /// Score line, prefixed by the last summary when `verbose`.
    pub fn score_text(&self, played_ms: f64, verbose: bool) -> String {
        let score = played_ms.round();
        match self.last_summary.filter(|_| verbose) {
            Some(summary) => format!("{}Score: {}", summary, score),
            None if verbose => format!("<measuring> Score: {}", score),
            None => format!("Score: {}", score),
        }
    }
}
