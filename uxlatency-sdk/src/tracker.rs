//! The Tracker - the registry of interaction records.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use uxlatency_types::{stats, InteractionRecord, Report, StatsSummary, Thresholds};

use crate::clock::{Clock, SystemClock};
use crate::handle::InteractionGuard;
use crate::output::Output;
use crate::signal::{Severity, Signal, SignalSink, TracingSink};
use crate::state::TrackerState;

/// Latencies above this are logged as critical by [`Tracker::latency`].
pub const DEFAULT_REFERENCE_MAX_LATENCY: Duration = Duration::from_secs(1);

/// Default interval between background reports.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// The registry of interaction records.
///
/// A tracker is a cheap handle: clones share the same records, so build one
/// at startup and pass clones to every place that records interactions.
/// Every operation takes a single lock, so each one is atomic with respect
/// to all others. No operation returns an error; unusual situations are
/// reported as [`Signal`]s instead.
///
/// # Example
///
/// ```rust
/// use uxlatency_sdk::Tracker;
///
/// let tracker = Tracker::new();
///
/// tracker.record_start("checkout-button");
/// // ... the checkout view appears ...
/// tracker.record_feedback("checkout-button");
///
/// assert!(tracker.latency("checkout-button").is_some());
/// assert_eq!(tracker.statistics().total, 1);
/// ```
#[derive(Clone)]
pub struct Tracker {
    state: Arc<Mutex<TrackerState>>,
    clock: Arc<dyn Clock>,
    sinks: Arc<Vec<Arc<dyn SignalSink>>>,
    outputs: Arc<Vec<Output>>,
    interval: Duration,
    reference_max: Duration,
}

impl Tracker {
    /// Create a tracker with default settings.
    ///
    /// Wall clock, default thresholds, signals logged through `tracing`,
    /// no outputs and a 1 second emission interval.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for configuring the tracker.
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::new()
    }

    /// Record the start of an interaction.
    ///
    /// Any earlier record with the same id, open or closed, is discarded.
    /// Overwriting a record that is still open emits a
    /// [`Signal::DuplicateStart`] warning.
    pub fn record_start(&self, id: &str) {
        let signals = {
            let mut state = self.state.lock();
            let now = self.clock.now();
            state.start(id, now)
        };
        self.emit_all(signals);
    }

    /// Record visible feedback for the most recent open interaction with `id`.
    ///
    /// If there is none, nothing changes and [`Signal::FeedbackFailed`] is
    /// emitted.
    pub fn record_feedback(&self, id: &str) {
        let signals = {
            let mut state = self.state.lock();
            let now = self.clock.now();
            state.feedback(id, now)
        };
        self.emit_all(signals);
    }

    /// Latency of the most recent interaction with `id`.
    ///
    /// Returns `None` if there is no such interaction or it is still open.
    /// The value is logged at critical severity when it exceeds
    /// `reference_max`, at info otherwise.
    pub fn latency_for(&self, id: &str, reference_max: Duration) -> Option<Duration> {
        let latency = self.state.lock().resolve(id)?.latency()?;

        let severity = if latency > reference_max {
            Severity::Critical
        } else {
            Severity::Info
        };
        self.emit(&Signal::LatencyComputed {
            id: id.to_string(),
            latency,
            severity,
        });

        Some(latency)
    }

    /// Latency of `id`, using the tracker's reference maximum.
    pub fn latency(&self, id: &str) -> Option<Duration> {
        self.latency_for(id, self.reference_max)
    }

    /// Copy of the most recent interaction with `id`.
    pub fn interaction(&self, id: &str) -> Option<InteractionRecord> {
        self.state.lock().resolve(id).cloned()
    }

    /// Copy of every record, in insertion order.
    pub fn interactions(&self) -> Vec<InteractionRecord> {
        self.state.lock().interactions.clone()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.state.lock().interactions.len()
    }

    /// True if no records are held.
    pub fn is_empty(&self) -> bool {
        self.state.lock().interactions.is_empty()
    }

    /// Remove every record.
    pub fn clear(&self) {
        let signals = self.state.lock().clear();
        self.emit_all(signals);
    }

    /// Replace the threshold configuration.
    pub fn configure_thresholds(&self, thresholds: Thresholds) {
        self.state.lock().thresholds = thresholds;
    }

    /// Current threshold configuration.
    pub fn thresholds(&self) -> Thresholds {
        self.state.lock().thresholds
    }

    /// Statistics over the records held right now.
    pub fn statistics(&self) -> StatsSummary {
        let state = self.state.lock();
        StatsSummary::from_records(&state.interactions, &state.thresholds)
    }

    /// Render every record in the delimited export format.
    pub fn export_delimited(&self) -> String {
        crate::export::to_delimited(&self.state.lock().interactions)
    }

    /// Snapshot of records and thresholds as a [`Report`].
    pub fn report(&self) -> Report {
        let state = self.state.lock();
        Report::new(state.thresholds, state.interactions.clone())
    }

    /// Emit a [`Signal::Summary`] with totals over the current records.
    pub fn log_final_summary(&self) {
        let signal = {
            let state = self.state.lock();
            Signal::Summary {
                summary: StatsSummary::from_records(&state.interactions, &state.thresholds),
                by_type: stats::count_by_type(&state.interactions),
            }
        };
        self.emit(&signal);
    }

    /// Start an interaction and get a guard that records its feedback.
    ///
    /// The feedback is recorded when the guard is dropped or when
    /// [`InteractionGuard::feedback`] is called.
    pub fn track_tap(&self, id: &str) -> InteractionGuard {
        self.record_start(id);
        InteractionGuard::new(self.clone(), id)
    }

    /// Start background emission of reports.
    ///
    /// This spawns a tokio task that periodically builds a report and
    /// emits it to all configured outputs.
    ///
    /// Returns a handle that can be used to stop the emission.
    #[cfg(feature = "tokio")]
    pub fn start(&self) -> EmissionHandle {
        use tokio::sync::watch;

        let (stop_tx, stop_rx) = watch::channel(false);
        let tracker = self.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(interval);
            let mut stop_rx = stop_rx;

            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        tracker.emit_now().await;
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        EmissionHandle { stop_tx }
    }

    /// Emit a report to all outputs immediately.
    #[cfg(feature = "tokio")]
    pub async fn emit_now(&self) {
        let report = self.report();
        for output in self.outputs.iter() {
            if let Err(e) = output.emit(&report).await {
                tracing::warn!(output = %output.describe(), error = %e, "failed to emit report");
            }
        }
    }

    fn emit(&self, signal: &Signal) {
        for sink in self.sinks.iter() {
            sink.emit(signal);
        }
    }

    fn emit_all(&self, signals: Vec<Signal>) {
        for signal in &signals {
            self.emit(signal);
        }
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("clock", &self.clock)
            .field("sinks", &self.sinks.len())
            .field("outputs", &self.outputs.len())
            .field("interval", &self.interval)
            .finish()
    }
}

/// Builder for configuring a Tracker.
#[derive(Debug, Default)]
pub struct TrackerBuilder {
    clock: Option<Arc<dyn Clock>>,
    sinks: Vec<Arc<dyn SignalSink>>,
    thresholds: Option<Thresholds>,
    outputs: Vec<Output>,
    interval: Option<Duration>,
    reference_max: Option<Duration>,
}

impl TrackerBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom clock. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Add a signal sink.
    ///
    /// If no sink is added, signals go to [`TracingSink`]. Adding any sink
    /// replaces that default; add `TracingSink` explicitly to keep it.
    pub fn sink(mut self, sink: impl SignalSink + 'static) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Initial thresholds. Defaults to [`Thresholds::default`].
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Add an output destination for background emission.
    ///
    /// Multiple outputs can be added; reports will be emitted to all of them.
    pub fn output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    /// Set the emission interval.
    ///
    /// Defaults to 1 second if not specified.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Latency above which [`Tracker::latency`] logs at critical severity.
    ///
    /// Defaults to 1 second.
    pub fn reference_max_latency(mut self, max: Duration) -> Self {
        self.reference_max = Some(max);
        self
    }

    /// Build the tracker.
    pub fn build(self) -> Tracker {
        let sinks: Vec<Arc<dyn SignalSink>> = if self.sinks.is_empty() {
            vec![Arc::new(TracingSink)]
        } else {
            self.sinks
        };

        Tracker {
            state: Arc::new(Mutex::new(TrackerState {
                interactions: Vec::new(),
                thresholds: self.thresholds.unwrap_or_default(),
            })),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            sinks: Arc::new(sinks),
            outputs: Arc::new(self.outputs),
            interval: self.interval.unwrap_or(DEFAULT_INTERVAL),
            reference_max: self.reference_max.unwrap_or(DEFAULT_REFERENCE_MAX_LATENCY),
        }
    }
}

/// Handle for controlling background emission.
///
/// Call `stop()` to end emission; dropping the handle also stops it.
#[cfg(feature = "tokio")]
pub struct EmissionHandle {
    stop_tx: tokio::sync::watch::Sender<bool>,
}

#[cfg(feature = "tokio")]
impl EmissionHandle {
    /// Stop background emission.
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
    }
}
