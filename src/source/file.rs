//! File-based report source.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use uxlatency_types::Report;

use super::ReportSource;

/// A source that reads reports from a JSON file.
///
/// This pairs with `uxlatency_sdk::Output::file`: the tracker overwrites
/// the file on every emission and this source polls it. The file's
/// modification time is tracked so a report is only parsed once.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being polled.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<Report> {
        let result = fs::read_to_string(&self.path)
            .map_err(|e| format!("Read error: {}", e))
            .and_then(|content| {
                serde_json::from_str(&content).map_err(|e| format!("Parse error: {}", e))
            });

        match result {
            Ok(report) => {
                self.last_error = None;
                Some(report)
            }
            Err(message) => {
                tracing::debug!(path = %self.path.display(), error = %message, "report not loaded");
                self.last_error = Some(message);
                None
            }
        }
    }
}

impl ReportSource for FileSource {
    fn poll(&mut self) -> Option<Report> {
        let current_modified = self.modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(last), Some(current)) => current > last,
        };

        if !file_changed {
            return None;
        }

        let report = self.read_file()?;
        self.last_modified = current_modified;
        tracing::debug!(path = %self.path.display(), interactions = report.len(), "report loaded");
        Some(report)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn refresh(&mut self) {
        self.last_modified = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use uxlatency_types::{InteractionRecord, Thresholds, Timestamp};

    fn sample_json() -> String {
        let report = Report::with_timestamp(
            1703160000000,
            Thresholds::default(),
            vec![
                InteractionRecord::closed(
                    "login-button",
                    Timestamp::from_millis(1000),
                    Timestamp::from_millis(1212),
                ),
                InteractionRecord::open("profile-tab", Timestamp::from_millis(2000)),
            ],
        );
        serde_json::to_string(&report).unwrap()
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/uxlatency.json");
        assert_eq!(source.path(), Path::new("/tmp/uxlatency.json"));
        assert_eq!(source.description(), "file: /tmp/uxlatency.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_poll_reads_once() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        let report = source.poll().unwrap();
        assert_eq!(report.len(), 2);
        assert!(report.get("login-button").is_some());

        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_refresh_forces_reread() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_some());
        assert!(source.poll().is_none());

        source.refresh();
        assert!(source.poll().is_some());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/uxlatency.json");

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }

    #[test]
    fn test_file_source_recovers_after_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{").unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_none());
        assert!(source.error().is_some());

        std::fs::write(file.path(), sample_json()).unwrap();
        assert!(source.poll().is_some());
        assert!(source.error().is_none());
    }
}
