//! Output backends for emitting reports.

use std::path::PathBuf;

use uxlatency_types::Report;

#[cfg(feature = "tokio")]
use crate::error::OutputError;

/// Output destination for reports.
///
/// Configure where the tracker should emit reports when background
/// emission is running.
#[derive(Debug)]
pub enum Output {
    /// Write reports to a JSON file.
    ///
    /// The file is overwritten with each report. This is the file the
    /// overlay viewer polls.
    File(PathBuf),

    /// Write the delimited export to a file.
    ///
    /// The file is overwritten with each report.
    Csv(PathBuf),

    /// Send reports through a channel.
    ///
    /// Use `Output::channel()` to create this variant and get the receiver.
    #[cfg(feature = "tokio")]
    Channel(tokio::sync::mpsc::Sender<Report>),
}

impl Output {
    /// Create a JSON file output.
    ///
    /// # Example
    ///
    /// ```rust
    /// use uxlatency_sdk::Output;
    ///
    /// let output = Output::file("latency.json");
    /// ```
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Output::File(path.into())
    }

    /// Create a CSV file output.
    pub fn csv(path: impl Into<PathBuf>) -> Self {
        Output::Csv(path.into())
    }

    /// Create a channel output and return both the output and receiver.
    ///
    /// # Example
    ///
    /// ```rust
    /// use uxlatency_sdk::Output;
    ///
    /// let (output, mut rx) = Output::channel(16);
    ///
    /// // Later, receive reports
    /// // while let Some(report) = rx.recv().await {
    /// //     println!("Got report with {} interactions", report.len());
    /// // }
    /// ```
    #[cfg(feature = "tokio")]
    pub fn channel(buffer: usize) -> (Self, tokio::sync::mpsc::Receiver<Report>) {
        let (tx, rx) = tokio::sync::mpsc::channel(buffer);
        (Output::Channel(tx), rx)
    }

    /// Short description used in log lines.
    pub fn describe(&self) -> String {
        match self {
            Output::File(path) => format!("file: {}", path.display()),
            Output::Csv(path) => format!("csv: {}", path.display()),
            #[cfg(feature = "tokio")]
            Output::Channel(_) => "channel".to_string(),
        }
    }

    /// Emit a report to this output.
    #[cfg(feature = "tokio")]
    pub(crate) async fn emit(&self, report: &Report) -> Result<(), OutputError> {
        match self {
            Output::File(path) => {
                let json = serde_json::to_string_pretty(report)?;
                tokio::fs::write(path, json).await?;
            }
            Output::Csv(path) => {
                let csv = crate::export::to_delimited(&report.interactions);
                tokio::fs::write(path, csv).await?;
            }
            Output::Channel(tx) => {
                // Best effort send (don't block if channel is full)
                let _ = tx.try_send(report.clone());
            }
        }
        Ok(())
    }
}
