use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Monotonic time source consulted once per tick.
///
/// `now` is measured from an arbitrary, fixed origin and must never go backwards. Settling
/// deadlines are absolute values on this scale.
pub trait Clock {
    /// Current time since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall-clock backed [`Clock`] whose origin is the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock starting at zero now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven [`Clock`] for tests and simulation.
///
/// Clones share the same time value, so a caller can keep one handle and give another to the
/// engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `step`.
    pub fn advance(&self, step: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *now += step;
    }

    /// Jump to an absolute time. Earlier values are ignored to keep the clock monotonic.
    pub fn set(&self, at: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        if at > *now {
            *now = at;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}
