//! Threshold classification of latencies into severity tiers.

use core::time::Duration;

/// Discrete latency severity.
///
/// Ordered from best to worst, with `Neutral` (no measurement) last so that
/// tier maps iterate in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tier {
    Green,
    Orange,
    Red,
    Neutral,
}

impl Tier {
    /// All tiers in display order.
    pub const ALL: [Tier; 4] = [Tier::Green, Tier::Orange, Tier::Red, Tier::Neutral];

    /// Returns a short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Green => "green",
            Tier::Orange => "orange",
            Tier::Red => "red",
            Tier::Neutral => "gray",
        }
    }
}

/// Latency limits used to classify interactions.
///
/// Both limits are exclusive upper bounds of their tier: a latency equal to
/// `green_limit` is orange, a latency equal to `orange_limit` is red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    /// Latencies strictly below this are green.
    #[cfg_attr(feature = "serde", serde(with = "crate::duration::micros"))]
    pub green_limit: Duration,

    /// Latencies strictly below this (and not green) are orange.
    #[cfg_attr(feature = "serde", serde(with = "crate::duration::micros"))]
    pub orange_limit: Duration,

    /// Tier reported for interactions that have no latency yet.
    pub missing_tier: Tier,
}

impl Thresholds {
    /// Default green limit (400ms).
    pub const DEFAULT_GREEN_LIMIT: Duration = Duration::from_millis(400);

    /// Default orange limit (900ms).
    pub const DEFAULT_ORANGE_LIMIT: Duration = Duration::from_millis(900);

    /// Create thresholds with explicit limits.
    pub const fn new(green_limit: Duration, orange_limit: Duration, missing_tier: Tier) -> Self {
        Self {
            green_limit,
            orange_limit,
            missing_tier,
        }
    }

    /// Classify a latency, or its absence, into a tier.
    pub fn classify(&self, latency: Option<Duration>) -> Tier {
        match latency {
            None => self.missing_tier,
            Some(l) if l < self.green_limit => Tier::Green,
            Some(l) if l < self.orange_limit => Tier::Orange,
            Some(_) => Tier::Red,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_GREEN_LIMIT,
            Self::DEFAULT_ORANGE_LIMIT,
            Tier::Neutral,
        )
    }
}

/// Classify a latency with the given thresholds.
pub fn classify(latency: Option<Duration>, thresholds: &Thresholds) -> Tier {
    thresholds.classify(latency)
}
