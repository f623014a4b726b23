//! Report sources for the overlay.
//!
//! The overlay does not care where reports come from: a JSON file written
//! by a tracker's file output, or an in-process channel fed by a tracker
//! running in the same program.

mod channel;
mod file;

pub use channel::ChannelSource;
pub use file::FileSource;

use std::fmt::Debug;

use uxlatency_types::Report;

/// Trait for receiving latency reports from various sources.
///
/// # Example
///
/// ```
/// use uxlatency_overlay::{FileSource, ReportSource};
///
/// let mut source = FileSource::new("uxlatency.json");
/// if let Some(report) = source.poll() {
///     println!("Got {} interactions", report.len());
/// }
/// ```
pub trait ReportSource: Send + Debug {
    /// Poll for the latest report.
    ///
    /// Returns `Some(report)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<Report>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the status bar.
    fn description(&self) -> &str;

    /// Returns the error message from the last poll, if it failed.
    fn error(&self) -> Option<&str>;

    /// Make the next `poll` return the current report even if unchanged.
    fn refresh(&mut self) {}
}
