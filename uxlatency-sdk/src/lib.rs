//! # uxlatency-sdk
//!
//! Perceived-latency tracking for user interactions.
//!
//! Record when a user acts (a tap on a button, a card, a tab) and when the
//! first visible feedback for that action appears. The tracker keeps one
//! record per interaction id, classifies latencies into green, orange and
//! red tiers, and produces statistics, delimited exports and JSON reports
//! that the `uxlatency` overlay can display.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use uxlatency_sdk::{Output, Tracker};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Write a report for the overlay every second
//!     let tracker = Tracker::builder()
//!         .output(Output::file("latency.json"))
//!         .interval(Duration::from_secs(1))
//!         .build();
//!
//!     // Start background emission (non-blocking)
//!     let emission = tracker.start();
//!
//!     // Record interactions as the UI handles them
//!     tracker.record_start("checkout-button");
//!     tracker.record_feedback("checkout-button");
//!
//!     // Or let a guard record the feedback at end of scope
//!     {
//!         let _tap = tracker.track_tap("profile-tab");
//!     }
//!
//!     tracker.log_final_summary();
//!     emission.stop();
//! }
//! ```
//!
//! ## Features
//!
//! - **No errors to handle**: unusual calls become [`Signal`]s, logged
//!   through `tracing` by default
//! - **Thread-safe**: clone the tracker into any thread or async task
//! - **Pluggable time**: swap in [`ManualClock`] for deterministic tests
//! - **Multiple outputs**: JSON file, CSV file, or channel

mod clock;
mod error;
pub mod export;
mod handle;
mod output;
mod signal;
mod state;
mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::OutputError;
pub use handle::InteractionGuard;
pub use output::Output;
#[cfg(feature = "tokio")]
pub use signal::ChannelSink;
pub use signal::{Severity, Signal, SignalSink, TracingSink};
#[cfg(feature = "tokio")]
pub use tracker::EmissionHandle;
pub use tracker::{Tracker, TrackerBuilder, DEFAULT_INTERVAL, DEFAULT_REFERENCE_MAX_LATENCY};

// Re-export types for convenience
pub use uxlatency_types::{
    InteractionRecord, Report, StatsSummary, Thresholds, Tier, Timestamp,
};
