//! Scoped interaction tracking.

use crate::tracker::Tracker;

/// Guard that records feedback for an interaction when dropped.
///
/// Obtain one from [`Tracker::track_tap`]. The start is recorded when the
/// guard is created; the feedback is recorded when the guard goes out of
/// scope, or earlier through [`feedback`](Self::feedback).
///
/// # Example
///
/// ```rust
/// use uxlatency_sdk::Tracker;
///
/// let tracker = Tracker::new();
///
/// {
///     let _tap = tracker.track_tap("profile-tab");
///     // ... render the profile screen ...
/// } // feedback recorded here
///
/// assert!(tracker.latency("profile-tab").is_some());
/// ```
pub struct InteractionGuard {
    tracker: Tracker,
    id: String,
    armed: bool,
}

impl InteractionGuard {
    pub(crate) fn new(tracker: Tracker, id: &str) -> Self {
        Self {
            tracker,
            id: id.to_string(),
            armed: true,
        }
    }

    /// The interaction id this guard closes.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Record feedback now instead of at end of scope.
    pub fn feedback(mut self) {
        self.armed = false;
        self.tracker.record_feedback(&self.id);
    }

    /// Drop the guard without recording feedback.
    ///
    /// The interaction stays open.
    pub fn abandon(mut self) {
        self.armed = false;
    }
}

impl Drop for InteractionGuard {
    fn drop(&mut self) {
        if self.armed {
            self.tracker.record_feedback(&self.id);
        }
    }
}

impl std::fmt::Debug for InteractionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionGuard")
            .field("id", &self.id)
            .field("armed", &self.armed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::time::Duration;
    use uxlatency_types::Timestamp;

    fn tracker() -> (Tracker, ManualClock) {
        let clock = ManualClock::new(Timestamp::from_millis(5_000));
        let tracker = Tracker::builder().clock(clock.clone()).build();
        (tracker, clock)
    }

    #[test]
    fn drop_records_feedback() {
        let (tracker, clock) = tracker();
        {
            let guard = tracker.track_tap("tab");
            assert_eq!(guard.id(), "tab");
            assert!(tracker.interaction("tab").unwrap().is_open());
            clock.advance(Duration::from_millis(80));
        }
        assert_eq!(tracker.latency("tab"), Some(Duration::from_millis(80)));
    }

    #[test]
    fn explicit_feedback_records_once() {
        let (tracker, clock) = tracker();
        let guard = tracker.track_tap("tab");
        clock.advance(Duration::from_millis(30));
        guard.feedback();

        clock.advance(Duration::from_millis(500));
        assert_eq!(tracker.latency("tab"), Some(Duration::from_millis(30)));
    }

    #[test]
    fn abandon_leaves_interaction_open() {
        let (tracker, _) = tracker();
        tracker.track_tap("tab").abandon();

        assert!(tracker.interaction("tab").unwrap().is_open());
        assert_eq!(tracker.latency("tab"), None);
    }
}
