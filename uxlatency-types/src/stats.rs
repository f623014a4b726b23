//! Aggregate statistics over interaction records.
//!
//! Every function here is pure: it reads the slice it is given, never
//! mutates it, and returns the same result for the same input.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;

use crate::{InteractionRecord, Thresholds, Tier, DEFAULT_INTERACTION_TYPE};

/// Mean of all present latencies, or zero if there are none.
pub fn average_latency(records: &[InteractionRecord]) -> Duration {
    let (total, count) = records
        .iter()
        .filter_map(InteractionRecord::latency)
        .fold((Duration::ZERO, 0u32), |(total, count), l| {
            (total.saturating_add(l), count + 1)
        });

    if count == 0 {
        Duration::ZERO
    } else {
        total / count
    }
}

/// Largest present latency, or zero if there are none.
pub fn max_latency(records: &[InteractionRecord]) -> Duration {
    records
        .iter()
        .filter_map(InteractionRecord::latency)
        .max()
        .unwrap_or(Duration::ZERO)
}

/// Number of records in each tier. Every record counts exactly once,
/// open records included.
pub fn distribution_by_tier(
    records: &[InteractionRecord],
    thresholds: &Thresholds,
) -> BTreeMap<Tier, usize> {
    let mut distribution = BTreeMap::new();
    for record in records {
        *distribution.entry(record.tier(thresholds)).or_insert(0) += 1;
    }
    distribution
}

/// Number of records per interaction category.
///
/// Records carry no category, so everything is reported under `"tap"`.
pub fn count_by_type(records: &[InteractionRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    if !records.is_empty() {
        counts.insert(DEFAULT_INTERACTION_TYPE.to_string(), records.len());
    }
    counts
}

/// Records whose latency strictly exceeds `threshold`, in input order.
///
/// Open records count as zero latency and are never outliers.
pub fn outliers_above(records: &[InteractionRecord], threshold: Duration) -> Vec<InteractionRecord> {
    records
        .iter()
        .filter(|r| r.latency().unwrap_or(Duration::ZERO) > threshold)
        .cloned()
        .collect()
}

/// Immutable summary of a set of records.
///
/// Computed on demand; nothing caches it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSummary {
    /// Number of records summarised.
    pub total: usize,

    /// Mean latency of closed records.
    #[cfg_attr(feature = "serde", serde(with = "crate::duration::micros"))]
    pub average: Duration,

    /// Worst latency of closed records.
    #[cfg_attr(feature = "serde", serde(with = "crate::duration::micros"))]
    pub max: Duration,

    /// Record count per tier.
    pub distribution: BTreeMap<Tier, usize>,
}

impl StatsSummary {
    /// Summarise `records` under `thresholds`.
    pub fn from_records(records: &[InteractionRecord], thresholds: &Thresholds) -> Self {
        Self {
            total: records.len(),
            average: average_latency(records),
            max: max_latency(records),
            distribution: distribution_by_tier(records, thresholds),
        }
    }

    /// Count for a single tier (zero if absent).
    pub fn count(&self, tier: Tier) -> usize {
        self.distribution.get(&tier).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timestamp;
    use alloc::vec;

    fn closed(id: &str, start: f64, feedback: f64) -> InteractionRecord {
        InteractionRecord::closed(
            id,
            Timestamp::from_secs_f64(start),
            Timestamp::from_secs_f64(feedback),
        )
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average_latency(&[]), Duration::ZERO);
    }

    #[test]
    fn average_of_two_latencies() {
        let records = vec![closed("btn1", 0.0, 0.2), closed("btn2", 1.0, 1.4)];
        assert_eq!(average_latency(&records), Duration::from_millis(300));
    }

    #[test]
    fn average_ignores_open_records() {
        let records = vec![
            closed("btn1", 0.0, 0.2),
            InteractionRecord::open("pending", Timestamp::from_secs_f64(5.0)),
        ];
        assert_eq!(average_latency(&records), Duration::from_millis(200));
    }

    #[test]
    fn max_returns_highest_latency() {
        let records = vec![closed("slow", 0.0, 0.8), closed("fast", 1.0, 1.2)];
        assert_eq!(max_latency(&records), Duration::from_millis(800));
    }

    #[test]
    fn max_of_only_open_records_is_zero() {
        let records = vec![InteractionRecord::open("a", Timestamp::from_secs_f64(1.0))];
        assert_eq!(max_latency(&records), Duration::ZERO);
    }

    #[test]
    fn distribution_counts_each_tier() {
        let records = vec![
            closed("green", 0.0, 0.3),
            closed("orange", 1.0, 1.6),
            closed("red", 2.0, 3.1),
            InteractionRecord::open("gray", Timestamp::from_secs_f64(4.0)),
        ];
        let distribution = distribution_by_tier(&records, &Thresholds::default());

        assert_eq!(distribution.get(&Tier::Green), Some(&1));
        assert_eq!(distribution.get(&Tier::Orange), Some(&1));
        assert_eq!(distribution.get(&Tier::Red), Some(&1));
        assert_eq!(distribution.get(&Tier::Neutral), Some(&1));
        assert_eq!(distribution.values().sum::<usize>(), records.len());
    }

    #[test]
    fn count_by_type_reports_taps() {
        let records = vec![
            closed("a", 0.0, 0.0),
            closed("b", 0.0, 0.0),
            closed("c", 0.0, 0.0),
        ];
        let counts = count_by_type(&records);
        assert_eq!(counts.get("tap"), Some(&3));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn count_by_type_of_empty_is_empty() {
        assert!(count_by_type(&[]).is_empty());
    }

    #[test]
    fn outliers_above_threshold() {
        let records = vec![closed("fast", 0.0, 0.2), closed("slow", 1.0, 2.5)];
        let outliers = outliers_above(&records, Duration::from_secs(1));
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].id, "slow");
    }

    #[test]
    fn outliers_exclude_equal_latency_and_open_records() {
        let records = vec![
            closed("exact", 0.0, 1.0),
            InteractionRecord::open("open", Timestamp::from_secs_f64(0.0)),
            closed("over", 0.0, 1.5),
            closed("way-over", 0.0, 3.0),
        ];
        let ids: Vec<_> = outliers_above(&records, Duration::from_secs(1))
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["over", "way-over"]);
    }

    #[test]
    fn summary_from_records() {
        let records = vec![closed("a", 0.0, 0.2), closed("b", 1.0, 1.4)];
        let summary = StatsSummary::from_records(&records, &Thresholds::default());

        assert_eq!(summary.total, 2);
        assert_eq!(summary.average, Duration::from_millis(300));
        assert_eq!(summary.max, Duration::from_millis(400));
        assert_eq!(summary.count(Tier::Green), 1);
        assert_eq!(summary.count(Tier::Orange), 1);
        assert_eq!(summary.count(Tier::Red), 0);
    }

    #[test]
    fn summary_does_not_mutate_input() {
        let records = vec![closed("a", 0.0, 0.2)];
        let before = records.clone();
        let _ = StatsSummary::from_records(&records, &Thresholds::default());
        assert_eq!(records, before);
    }
}
