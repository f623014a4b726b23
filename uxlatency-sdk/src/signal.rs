//! Instrumentation signals emitted by the tracker.
//!
//! The tracker never fails; anything unusual it sees (a duplicate start, a
//! feedback with nothing to close, a clock that went backwards) becomes a
//! [`Signal`] handed to every configured [`SignalSink`]. Where the signal
//! ends up is the sink's business.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::time::Duration;

use tracing::{debug, error, info, warn};
use uxlatency_types::{StatsSummary, Timestamp, DEFAULT_INTERACTION_TYPE};

/// Severity attached to every signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

/// A discrete instrumentation event.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// A new interaction was opened.
    InteractionStarted { id: String },
    /// An open interaction received its feedback timestamp.
    FeedbackRecorded { id: String },
    /// Feedback arrived for an id with no open interaction.
    FeedbackFailed { id: String },
    /// A latency was read back for an id.
    LatencyComputed {
        id: String,
        latency: Duration,
        severity: Severity,
    },
    /// All records were cleared.
    TrackerReset,
    /// A start arrived while an interaction with the same id was still open.
    DuplicateStart { id: String },
    /// Feedback was stamped earlier than its start; latency is clamped to zero.
    ClockSkew {
        id: String,
        start: Timestamp,
        feedback: Timestamp,
    },
    /// Totals requested through `Tracker::log_final_summary`.
    Summary {
        summary: StatsSummary,
        by_type: BTreeMap<String, usize>,
    },
}

impl Signal {
    /// Stable event name, e.g. `feedback_failed`.
    pub fn name(&self) -> &'static str {
        match self {
            Signal::InteractionStarted { .. } => "interaction_started",
            Signal::FeedbackRecorded { .. } => "feedback_recorded",
            Signal::FeedbackFailed { .. } => "feedback_failed",
            Signal::LatencyComputed { .. } => "latency_computed",
            Signal::TrackerReset => "tracker_reset",
            Signal::DuplicateStart { .. } => "duplicate_start_warning",
            Signal::ClockSkew { .. } => "clock_skew",
            Signal::Summary { .. } => "summary",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Signal::InteractionStarted { .. } => Severity::Debug,
            Signal::FeedbackRecorded { .. } => Severity::Info,
            Signal::FeedbackFailed { .. } => Severity::Error,
            Signal::LatencyComputed { severity, .. } => *severity,
            Signal::TrackerReset => Severity::Warning,
            Signal::DuplicateStart { .. } => Severity::Warning,
            Signal::ClockSkew { .. } => Severity::Warning,
            Signal::Summary { .. } => Severity::Info,
        }
    }

    /// The interaction id this signal concerns, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Signal::InteractionStarted { id }
            | Signal::FeedbackRecorded { id }
            | Signal::FeedbackFailed { id }
            | Signal::LatencyComputed { id, .. }
            | Signal::DuplicateStart { id }
            | Signal::ClockSkew { id, .. } => Some(id),
            Signal::TrackerReset | Signal::Summary { .. } => None,
        }
    }
}

/// Destination for tracker signals.
///
/// Sinks are called after the tracker has released its lock, so they may
/// call back into the tracker. They should not block.
pub trait SignalSink: Send + Sync + Debug {
    fn emit(&self, signal: &Signal);
}

/// Routes signals to `tracing` at the level matching their severity.
///
/// `Critical` has no tracing level of its own; it is logged at `error`
/// with `critical = true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

macro_rules! event_at {
    ($severity:expr, $($rest:tt)+) => {
        match $severity {
            Severity::Debug => debug!($($rest)+),
            Severity::Info => info!($($rest)+),
            Severity::Warning => warn!($($rest)+),
            Severity::Error => error!($($rest)+),
            Severity::Critical => error!(critical = true, $($rest)+),
        }
    };
}

impl SignalSink for TracingSink {
    fn emit(&self, signal: &Signal) {
        let event = signal.name();
        match signal {
            Signal::InteractionStarted { id } => {
                debug!(event, id = %id, kind = DEFAULT_INTERACTION_TYPE, "interaction started")
            }
            Signal::FeedbackRecorded { id } => info!(event, id = %id, "feedback recorded"),
            Signal::FeedbackFailed { id } => {
                error!(event, id = %id, "no open interaction to record feedback for")
            }
            Signal::LatencyComputed {
                id,
                latency,
                severity,
            } => {
                let secs = latency.as_secs_f64();
                event_at!(*severity, event, id = %id, latency_secs = secs, "latency computed")
            }
            Signal::TrackerReset => warn!(event, "tracker cleared"),
            Signal::DuplicateStart { id } => warn!(
                event,
                id = %id,
                "interaction is already active, overwriting unfinished interaction"
            ),
            Signal::ClockSkew {
                id,
                start,
                feedback,
            } => warn!(
                event,
                id = %id,
                start_us = start.as_micros(),
                feedback_us = feedback.as_micros(),
                "feedback precedes start, latency clamped to zero"
            ),
            Signal::Summary { summary, by_type } => {
                info!(
                    event,
                    total = summary.total,
                    average_secs = summary.average.as_secs_f64(),
                    max_secs = summary.max.as_secs_f64(),
                    "latency summary"
                );
                for (kind, count) in by_type {
                    info!(event, kind = %kind, count, "latency summary by type");
                }
            }
        }
    }
}

/// Forwards signals into a channel.
///
/// Use [`ChannelSink::create`] to get the sink and its receiver.
#[cfg(feature = "tokio")]
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: tokio::sync::mpsc::UnboundedSender<Signal>,
}

#[cfg(feature = "tokio")]
impl ChannelSink {
    pub fn create() -> (Self, tokio::sync::mpsc::UnboundedReceiver<Signal>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[cfg(feature = "tokio")]
impl SignalSink for ChannelSink {
    fn emit(&self, signal: &Signal) {
        // Receiver may be gone; signals are best effort.
        let _ = self.tx.send(signal.clone());
    }
}
