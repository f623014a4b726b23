//! Report - a point-in-time view of a tracker.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{stats, InteractionRecord, SchemaVersion, StatsSummary, Thresholds};

/// A point-in-time copy of every interaction a tracker holds.
///
/// Reports are emitted periodically (e.g., every second) and consumed by
/// the overlay viewer or any other tool that reads the JSON form.
///
/// # Example
///
/// ```rust
/// use uxlatency_types::{InteractionRecord, Report, Thresholds, Timestamp};
///
/// let report = Report::with_timestamp(
///     1703160000000,
///     Thresholds::default(),
///     vec![InteractionRecord::open("checkout", Timestamp::from_millis(1703160000000))],
/// );
///
/// assert_eq!(report.len(), 1);
/// assert!(report.get("checkout").unwrap().is_open());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    /// Schema version for forward compatibility.
    pub version: SchemaVersion,

    /// Unix timestamp in milliseconds when this report was taken.
    pub timestamp_ms: u64,

    /// Thresholds the producing tracker was configured with.
    pub thresholds: Thresholds,

    /// Interaction records in insertion order.
    pub interactions: Vec<InteractionRecord>,
}

impl Report {
    /// Create a new report stamped with the current time.
    pub fn new(thresholds: Thresholds, interactions: Vec<InteractionRecord>) -> Self {
        Self::with_timestamp(current_timestamp_ms(), thresholds, interactions)
    }

    /// Create a new report with a specific timestamp.
    pub fn with_timestamp(
        timestamp_ms: u64,
        thresholds: Thresholds,
        interactions: Vec<InteractionRecord>,
    ) -> Self {
        Self {
            version: SchemaVersion::current(),
            timestamp_ms,
            thresholds,
            interactions,
        }
    }

    /// Check if the report holds no interactions.
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Number of interactions in the report.
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Most recent interaction with the given id.
    pub fn get(&self, id: &str) -> Option<&InteractionRecord> {
        self.interactions.iter().rev().find(|r| r.id == id)
    }

    /// Iterate over all interactions.
    pub fn iter(&self) -> impl Iterator<Item = &InteractionRecord> {
        self.interactions.iter()
    }

    /// Summary statistics under the report's own thresholds.
    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from_records(&self.interactions, &self.thresholds)
    }

    /// Number of interactions that are still waiting for feedback.
    pub fn open_count(&self) -> usize {
        self.interactions.iter().filter(|r| r.is_open()).count()
    }

    /// Interactions slower than `threshold`.
    pub fn outliers_above(&self, threshold: std::time::Duration) -> Vec<InteractionRecord> {
        stats::outliers_above(&self.interactions, threshold)
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new(Thresholds::default(), Vec::new())
    }
}

/// Get current timestamp in milliseconds since Unix epoch.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
