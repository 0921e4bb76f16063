//! Time sources for the search budget.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Monotonic time since some fixed starting point.
    fn now(&self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Advances by a fixed step every time it's read, independent of real time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Duration>,
    step: Duration,
}

impl ManualClock {
    pub fn new(step: Duration) -> Self {
        ManualClock {
            now: Cell::new(Duration::from_secs(0)),
            step,
        }
    }

    /// How many times the clock has been read so far.
    pub fn reads(&self) -> u32 {
        if self.step == Duration::from_secs(0) {
            return 0;
        }
        (self.now.get().as_nanos() / self.step.as_nanos()) as u32
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        let now = self.now.get() + self.step;
        self.now.set(now);
        now
    }
}
