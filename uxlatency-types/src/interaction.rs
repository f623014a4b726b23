//! The interaction record - the unit of measurement.

use alloc::string::String;
use core::time::Duration;

use crate::{Thresholds, Tier, Timestamp};

/// A single user interaction paired with the UI's visible response.
///
/// `start` is fixed at creation. `feedback` moves from absent to present at
/// most once. Latency is never stored; [`InteractionRecord::latency`]
/// derives it from the two timestamps on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionRecord {
    /// Logical name of the tracked element or action.
    pub id: String,

    /// When the interaction started (e.g. the tap ended).
    pub start: Timestamp,

    /// When the UI produced visible feedback, if it has yet.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub feedback: Option<Timestamp>,
}

impl InteractionRecord {
    /// Create an open record (no feedback yet).
    pub fn open(id: impl Into<String>, start: Timestamp) -> Self {
        Self {
            id: id.into(),
            start,
            feedback: None,
        }
    }

    /// Create a closed record with both timestamps.
    pub fn closed(id: impl Into<String>, start: Timestamp, feedback: Timestamp) -> Self {
        Self {
            id: id.into(),
            start,
            feedback: Some(feedback),
        }
    }

    /// True while feedback has not been recorded.
    pub fn is_open(&self) -> bool {
        self.feedback.is_none()
    }

    /// Elapsed time between start and feedback.
    ///
    /// Returns `None` while the record is open. A feedback timestamp earlier
    /// than the start (wall clock stepped backwards) yields zero.
    pub fn latency(&self) -> Option<Duration> {
        self.feedback
            .map(|feedback| feedback.saturating_duration_since(self.start))
    }

    /// True if feedback was recorded before the start timestamp.
    pub fn is_skewed(&self) -> bool {
        self.feedback.map_or(false, |feedback| feedback < self.start)
    }

    /// Latency tier of this record under the given thresholds.
    pub fn tier(&self, thresholds: &Thresholds) -> Tier {
        thresholds.classify(self.latency())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_record_has_no_latency() {
        let record = InteractionRecord::open("button", Timestamp::from_millis(1000));
        assert!(record.is_open());
        assert_eq!(record.latency(), None);
    }

    #[test]
    fn latency_is_feedback_minus_start() {
        let record = InteractionRecord::closed(
            "card",
            Timestamp::from_millis(1000),
            Timestamp::from_millis(1150),
        );
        assert!(!record.is_open());
        assert_eq!(record.latency(), Some(Duration::from_millis(150)));
    }

    #[test]
    fn latency_tracks_feedback_changes() {
        let mut record = InteractionRecord::open("card", Timestamp::from_millis(0));
        record.feedback = Some(Timestamp::from_millis(300));
        assert_eq!(record.latency(), Some(Duration::from_millis(300)));
    }

    #[test]
    fn skewed_feedback_clamps_latency_to_zero() {
        let record = InteractionRecord::closed(
            "skewed",
            Timestamp::from_millis(2000),
            Timestamp::from_millis(1500),
        );
        assert!(record.is_skewed());
        assert_eq!(record.latency(), Some(Duration::ZERO));
    }

    #[test]
    fn tier_uses_thresholds() {
        let thresholds = Thresholds::default();
        let fast = InteractionRecord::closed("a", Timestamp::from_millis(0), Timestamp::from_millis(212));
        let slow = InteractionRecord::closed("b", Timestamp::from_millis(0), Timestamp::from_millis(784));
        let open = InteractionRecord::open("c", Timestamp::from_millis(0));

        assert_eq!(fast.tier(&thresholds), Tier::Green);
        assert_eq!(slow.tier(&thresholds), Tier::Orange);
        assert_eq!(open.tier(&thresholds), Tier::Neutral);
    }

    #[test]
    fn empty_id_is_accepted_verbatim() {
        let record = InteractionRecord::open("", Timestamp::EPOCH);
        assert_eq!(record.id, "");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_omits_absent_feedback() {
        let record = InteractionRecord::open("x", Timestamp::from_micros(5));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"x","start":5}"#);

        let parsed: InteractionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
