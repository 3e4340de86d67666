// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction so elapsed-time tracking can be driven by tests

use std::time::Instant;

/// Source of the current instant for session timing
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;

    /// Whole seconds elapsed since `start`, saturating at zero.
    fn elapsed_secs(&self, start: Instant) -> u64 {
        self.now().saturating_duration_since(start).as_secs()
    }
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::Clock;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    /// Manually advanced clock; clones share the same time.
    #[derive(Clone, Debug)]
    pub struct FakeClock {
        current: Arc<Mutex<Instant>>,
    }

    impl FakeClock {
        pub fn new() -> Self {
            Self { current: Arc::new(Mutex::new(Instant::now())) }
        }

        pub fn advance(&self, by: Duration) {
            *self.current.lock() += by;
        }
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            *self.current.lock()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
