//! Clocks and fixed-period scheduling.
//!
//! The overlay is driven from the host's event loop: nothing here sleeps or
//! spawns threads. Schedules are polled against a [`Clock`] instead.

use std::cell::Cell;
use std::rc::Rc;

/// Source of the current time in milliseconds.
///
/// Values only need to be monotonic for the lifetime of one overlay; the
/// sway wave uses the raw value as its phase.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock time since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep a handle while the
/// overlay owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Move the clock forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Upper bound on periods fired by a single [`Interval::poll`].
///
/// A host that stalls (suspended terminal, debugger) resumes at the normal
/// cadence instead of replaying every missed tick.
const MAX_CATCH_UP: u32 = 4;

/// A repeating schedule with a fixed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ms: u64,
    next_due_ms: u64,
}

impl Interval {
    /// Start a schedule whose first firing is one period after `now_ms`.
    pub fn new(period_ms: u64, now_ms: u64) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            next_due_ms: now_ms.saturating_add(period_ms),
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn next_due_ms(&self) -> u64 {
        self.next_due_ms
    }

    /// Number of periods that elapsed up to `now_ms`, capped so a stalled
    /// host does not replay a backlog.
    pub fn poll(&mut self, now_ms: u64) -> u32 {
        let mut fired = 0;
        while self.next_due_ms <= now_ms && fired < MAX_CATCH_UP {
            self.next_due_ms = self.next_due_ms.saturating_add(self.period_ms);
            fired += 1;
        }
        if self.next_due_ms <= now_ms {
            self.next_due_ms = now_ms.saturating_add(self.period_ms);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(1_000);
        let handle = clock.clone();
        handle.advance(17);
        assert_eq!(clock.now_ms(), 1_017);
        handle.set(5);
        assert_eq!(clock.now_ms(), 5);
    }

    #[test]
    fn test_system_clock_is_wall_time() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }

    #[test]
    fn test_interval_fires_once_per_period() {
        let mut interval = Interval::new(17, 0);
        assert_eq!(interval.poll(16), 0);
        assert_eq!(interval.poll(17), 1);
        assert_eq!(interval.poll(20), 0);
        assert_eq!(interval.poll(50), 1);
        assert_eq!(interval.next_due_ms(), 51);
    }

    #[test]
    fn test_interval_caps_catch_up() {
        let mut interval = Interval::new(10, 0);
        assert_eq!(interval.poll(1_000), MAX_CATCH_UP);
        assert_eq!(interval.next_due_ms(), 1_010);
        assert_eq!(interval.poll(1_010), 1);
    }

    #[test]
    fn test_interval_zero_period_is_clamped() {
        let interval = Interval::new(0, 100);
        assert_eq!(interval.period_ms(), 1);
        assert_eq!(interval.next_due_ms(), 101);
    }
}
