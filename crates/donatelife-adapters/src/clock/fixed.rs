//! Manually driven clock for testing.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

use donatelife_core::application::ports::Clock;

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and give
/// another to the service under test.
#[derive(Debug, Clone)]
pub struct FixedClock {
    inner: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(now)),
        }
    }

    /// Jump to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Move forward (or backward, for a negative duration).
    pub fn advance(&self, by: Duration) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *inner += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.inner.read().unwrap_or_else(|e| e.into_inner())
    }
}
