//! Application state for the overlay.

use std::path::Path;
use std::time::{Duration, Instant};

use uxlatency_types::{InteractionRecord, Report, StatsSummary, Thresholds};

use crate::source::ReportSource;
use crate::ui::Theme;

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data source
    source: Box<dyn ReportSource>,
    pub report: Option<Report>,
    pub last_updated: Option<Instant>,
    pub load_error: Option<String>,

    /// Thresholds from the viewer's configuration. When unset, the
    /// thresholds carried in each report are used.
    pub threshold_override: Option<Thresholds>,

    // Navigation state
    pub selected_index: usize,

    // UI
    pub theme: Theme,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App, detecting the theme from the terminal.
    pub fn new(source: Box<dyn ReportSource>, threshold_override: Option<Thresholds>) -> Self {
        Self::with_theme(source, threshold_override, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(
        source: Box<dyn ReportSource>,
        threshold_override: Option<Thresholds>,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            show_help: false,
            source,
            report: None,
            last_updated: None,
            load_error: None,
            threshold_override,
            selected_index: 0,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Thresholds used for classification.
    pub fn thresholds(&self) -> Thresholds {
        self.threshold_override
            .or_else(|| self.report.as_ref().map(|r| r.thresholds))
            .unwrap_or_default()
    }

    /// Records of the current report, in insertion order.
    pub fn interactions(&self) -> &[InteractionRecord] {
        self.report
            .as_ref()
            .map(|r| r.interactions.as_slice())
            .unwrap_or(&[])
    }

    /// Statistics of the current report under [`App::thresholds`].
    pub fn summary(&self) -> Option<StatsSummary> {
        let report = self.report.as_ref()?;
        Some(StatsSummary::from_records(
            &report.interactions,
            &self.thresholds(),
        ))
    }

    /// The record under the cursor.
    pub fn selected_record(&self) -> Option<&InteractionRecord> {
        self.interactions().get(self.selected_index)
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Poll the source for a new report.
    ///
    /// Returns true if a new report was received.
    pub fn reload_data(&mut self) -> bool {
        if let Some(report) = self.source.poll() {
            self.report = Some(report);
            self.last_updated = Some(Instant::now());
            self.load_error = None;
            self.clamp_selection();
            return true;
        }

        if let Some(err) = self.source.error() {
            if self.load_error.as_deref() != Some(err) {
                tracing::warn!(source = %self.source.description(), error = %err, "failed to load report");
            }
            self.load_error = Some(err.to_string());
        }
        false
    }

    /// Reload even if the source has nothing new.
    pub fn force_reload(&mut self) -> bool {
        self.source.refresh();
        self.reload_data()
    }

    fn clamp_selection(&mut self) {
        let max = self.interactions().len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max);
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        let max = self.interactions().len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_index = self.interactions().len().saturating_sub(1);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Write the current report in the delimited export format.
    pub fn export_csv(&self, path: &Path) -> anyhow::Result<()> {
        let Some(ref report) = self.report else {
            anyhow::bail!("No data to export");
        };
        std::fs::write(path, uxlatency_sdk::export::to_delimited(&report.interactions))?;
        Ok(())
    }
}
