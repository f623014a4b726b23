//! Time sources for the tracker.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use uxlatency_types::Timestamp;

/// A source of timestamps.
///
/// The tracker reads its clock while holding its lock, so `now()` must be
/// cheap and must not call back into the tracker.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one copy and hand the
/// other to a tracker.
///
/// ```rust
/// use std::time::Duration;
/// use uxlatency_sdk::{Clock, ManualClock};
/// use uxlatency_types::Timestamp;
///
/// let clock = ManualClock::new(Timestamp::from_millis(1000));
/// clock.advance(Duration::from_millis(150));
/// assert_eq!(clock.now(), Timestamp::from_millis(1150));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            micros: Arc::new(AtomicU64::new(start.as_micros())),
        }
    }

    /// Jump to an absolute time. Moving backwards is allowed.
    pub fn set(&self, ts: Timestamp) {
        self.micros.store(ts.as_micros(), Ordering::SeqCst);
    }

    /// Move forward by `d`.
    pub fn advance(&self, d: Duration) {
        self.micros.fetch_add(d.as_micros() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_micros(self.micros.load(Ordering::SeqCst))
    }
}
