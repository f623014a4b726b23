//! # uxlatency-overlay
//!
//! A terminal overlay for viewing perceived-latency reports produced by
//! `uxlatency-sdk`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       Application                        │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐              │
//! │  │  app    │───▶│   ui     │───▶│ Terminal│              │
//! │  │ (state) │    │(overlay) │    │         │              │
//! │  └────┬────┘    └──────────┘    └─────────┘              │
//! │       │                                                  │
//! │       ▼                                                  │
//! │  ┌─────────┐                                             │
//! │  │ source  │◀── FileSource | ChannelSource               │
//! │  │ (input) │                                             │
//! │  └─────────┘                                             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, selection and reload logic
//! - **[`source`]**: Report sources ([`ReportSource`] trait) for file polling
//!   and in-process channels
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered configuration (file, environment, CLI)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the report written by Output::file("uxlatency.json")
//! uxlatency --file uxlatency.json
//!
//! # Stricter tiers than the ones in the report
//! uxlatency --green 300ms --orange 700ms
//!
//! # Convert a report to CSV and exit
//! uxlatency --file uxlatency.json --export latency.csv
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use uxlatency_overlay::{App, FileSource};
//!
//! let source = Box::new(FileSource::new("uxlatency.json"));
//! let app = App::new(source, None);
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use uxlatency_overlay::{App, ChannelSource};
//! use uxlatency_sdk::Tracker;
//!
//! let tracker = Tracker::new();
//! let (tx, source) = ChannelSource::create("in-process");
//! let app = App::new(Box::new(source), None);
//!
//! tracker.record_start("checkout-button");
//! tracker.record_feedback("checkout-button");
//! tx.send(tracker.report()).unwrap();
//! ```
//!
//! ### Feeding a channel source from the demo producer
//!
//! ```
//! use uxlatency_overlay::{demo, ChannelSource, ReportSource};
//! use uxlatency_sdk::Tracker;
//!
//! # tokio_test::block_on(async {
//! let tracker = Tracker::new();
//! let (tx, mut source) = ChannelSource::create("demo");
//!
//! // One simulated tap; the sender is dropped when it returns
//! demo::simulate(tracker.clone(), tx, Some(1)).await;
//!
//! let report = source.poll().unwrap();
//! assert_eq!(report.len(), 1);
//! # });
//! ```

pub mod app;
pub mod config;
pub mod demo;
pub mod events;
pub mod export;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::{ConfigError, OverlayConfig, Overrides};
pub use source::{ChannelSource, FileSource, ReportSource};
pub use ui::Theme;
