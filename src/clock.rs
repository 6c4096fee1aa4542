//! Source of "now" for the request book and the CLI

use chrono::{Local, NaiveDateTime};

/// Abstraction over the current local time so lifecycle operations can be
/// pinned to a fixed instant in tests.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
