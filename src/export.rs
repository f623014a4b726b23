//! Non-interactive export of a report file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use uxlatency_types::Report;

/// Read the JSON report at `report_path` and write its delimited export
/// to `export_path`. Returns the number of rows written.
pub fn export_report(report_path: &Path, export_path: &Path) -> Result<usize> {
    let content = fs::read_to_string(report_path)
        .with_context(|| format!("failed to read {}", report_path.display()))?;
    let report: Report = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", report_path.display()))?;

    fs::write(export_path, uxlatency_sdk::export::to_delimited(&report.interactions))
        .with_context(|| format!("failed to write {}", export_path.display()))?;

    Ok(report.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uxlatency_types::{InteractionRecord, Thresholds, Timestamp};

    #[test]
    fn test_export_report() {
        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("uxlatency.json");
        let export_path = dir.path().join("uxlatency.csv");

        let report = Report::with_timestamp(
            0,
            Thresholds::default(),
            vec![
                InteractionRecord::open("x", Timestamp::from_secs_f64(1.0)),
                InteractionRecord::closed(
                    "y",
                    Timestamp::from_secs_f64(2.0),
                    Timestamp::from_secs_f64(2.5),
                ),
            ],
        );
        fs::write(&report_path, serde_json::to_string(&report).unwrap()).unwrap();

        assert_eq!(export_report(&report_path, &export_path).unwrap(), 2);

        let csv = fs::read_to_string(&export_path).unwrap();
        assert_eq!(
            csv,
            "id,type,start,feedback,latency\nx,tap,1,0,0\ny,tap,2,2.5,0.5\n"
        );
    }

    #[test]
    fn test_export_missing_report() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_report(&dir.path().join("missing.json"), &dir.path().join("out.csv"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
