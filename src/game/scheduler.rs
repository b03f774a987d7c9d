//! Frame Scheduling
//!
//! The round never loops on its own. After each running tick it asks its
//! [`FrameScheduler`] for another frame; the host (an animation-frame
//! callback, a game loop, a test) decides when that frame happens and
//! calls `Round::tick` with a monotonically increasing timestamp.

/// Clock and frame-request capability supplied by the host.
pub trait FrameScheduler {
    /// Current time in milliseconds, on the same clock as tick timestamps.
    fn now(&self) -> f64;

    /// Ask for one more tick.
    fn request_next_tick(&mut self);

    /// Withdraw an outstanding request, if the host supports it.
    fn cancel_tick(&mut self) {}
}

/// Synthetic clock for tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: f64,
    pending: bool,
    requests: u64,
}

impl ManualScheduler {
    /// Scheduler whose clock reads `now`.
    pub fn new(now: f64) -> Self {
        Self {
            now,
            pending: false,
            requests: 0,
        }
    }

    /// Move the clock forward and return the new time.
    pub fn advance(&mut self, ms: f64) -> f64 {
        self.now += ms;
        self.now
    }

    /// Set the clock.
    pub fn set_now(&mut self, now: f64) {
        self.now = now;
    }

    /// Consume the outstanding frame request, if any.
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// A frame has been requested and not yet taken.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total requests received.
    pub fn request_count(&self) -> u64 {
        self.requests
    }
}

impl FrameScheduler for ManualScheduler {
    fn now(&self) -> f64 {
        self.now
    }

    fn request_next_tick(&mut self) {
        self.pending = true;
        self.requests += 1;
    }

    fn cancel_tick(&mut self) {
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler() {
        let mut s = ManualScheduler::new(100.0);
        assert_eq!(s.now(), 100.0);
        assert!(!s.take_request());

        s.request_next_tick();
        s.request_next_tick();
        assert!(s.is_pending());
        assert_eq!(s.request_count(), 2);
        assert!(s.take_request());
        assert!(!s.take_request());

        s.request_next_tick();
        s.cancel_tick();
        assert!(!s.is_pending());

        assert_eq!(s.advance(16.0), 116.0);
        s.set_now(5.0);
        assert_eq!(s.now(), 5.0);
    }
}
