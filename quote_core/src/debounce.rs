//! # Input Debouncing
//!
//! Rapid input events (keystrokes in a dimension field) should coalesce
//! into one recompute instead of one per key. [`Debouncer`] implements
//! the fixed 300 ms quiet period: every trigger restarts the window, and
//! the pending fire is consumed by polling once the window has elapsed.
//!
//! The core stays free of threads and timers: callers pass `Instant`s
//! in, which also makes the behavior fully testable with synthetic
//! clocks. Cancellation is implicit - a newer trigger supersedes a
//! pending one, and there is no in-flight work to abort.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::debounce::Debouncer;
//! use std::time::{Duration, Instant};
//!
//! let mut debouncer = Debouncer::new();
//! let start = Instant::now();
//!
//! debouncer.trigger(start);
//! assert!(!debouncer.fire_ready(start)); // still quiet
//! assert!(debouncer.fire_ready(start + Duration::from_millis(300)));
//! assert!(!debouncer.fire_ready(start + Duration::from_millis(301))); // consumed
//! ```

use std::time::{Duration, Instant};

/// Quiet period between the last input event and the recompute it triggers
pub const QUIET_PERIOD: Duration = Duration::from_millis(300);

/// A poll-driven debouncer with a fixed quiet period.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new() -> Self {
        Debouncer { deadline: None }
    }

    /// Record an input event at `now`. Restarts the quiet window,
    /// superseding any pending fire.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + QUIET_PERIOD);
    }

    /// Whether a fire is pending (triggered but not yet consumed)
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Poll at `now`. Returns `true` exactly once per elapsed quiet
    /// window; the pending fire is consumed.
    pub fn fire_ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fire_without_trigger() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.is_pending());
        assert!(!debouncer.fire_ready(Instant::now()));
    }

    #[test]
    fn test_fires_after_quiet_period() {
        let mut debouncer = Debouncer::new();
        let start = Instant::now();
        debouncer.trigger(start);

        assert!(!debouncer.fire_ready(start + Duration::from_millis(299)));
        assert!(debouncer.fire_ready(start + Duration::from_millis(300)));
    }

    #[test]
    fn test_fire_consumed() {
        let mut debouncer = Debouncer::new();
        let start = Instant::now();
        debouncer.trigger(start);

        let later = start + Duration::from_millis(400);
        assert!(debouncer.fire_ready(later));
        assert!(!debouncer.is_pending());
        assert!(!debouncer.fire_ready(later + Duration::from_millis(400)));
    }

    #[test]
    fn test_retrigger_supersedes_pending() {
        let mut debouncer = Debouncer::new();
        let start = Instant::now();

        // keystrokes at 0, 100, 200 ms: one fire, 300 ms after the last
        debouncer.trigger(start);
        debouncer.trigger(start + Duration::from_millis(100));
        debouncer.trigger(start + Duration::from_millis(200));

        assert!(!debouncer.fire_ready(start + Duration::from_millis(350)));
        assert!(debouncer.fire_ready(start + Duration::from_millis(500)));
    }
}
