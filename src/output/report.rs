use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use std::path::Path;

use crate::pipeline::{Batch, FailedFile, ProcessedReceipt};

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub failed: usize,
    pub points: u64,
}

/// JSON document describing a run: every processed receipt, every file
/// that could not be loaded, and totals.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub receipts: &'a [ProcessedReceipt],
    pub failed: &'a [FailedFile],
    pub summary: ReportSummary,
}

impl<'a> Report<'a> {
    pub fn new(batch: &'a Batch) -> Self {
        let receipts: &'a [ProcessedReceipt] = &batch.processed;
        let valid = receipts.iter().filter(|r| r.is_valid()).count();
        let points = receipts
            .iter()
            .filter_map(|r| r.points.as_ref())
            .fold(0u64, |sum, result| sum.saturating_add(result.points));

        Self {
            receipts,
            failed: &batch.failed,
            summary: ReportSummary {
                total: receipts.len() + batch.failed.len(),
                valid,
                invalid: receipts.len() - valid,
                failed: batch.failed.len(),
                points,
            },
        }
    }
}

/// Render the report as pretty-printed JSON
pub fn format_json(batch: &Batch) -> Result<String> {
    serde_json::to_string_pretty(&Report::new(batch)).context("Failed to serialize report")
}

/// Save the report to a JSON file atomically
///
/// Uses atomic-write-file so a reader never sees a half-written report.
pub fn save_report(path: &Path, batch: &Batch) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, &Report::new(batch))
        .context("Failed to serialize report")?;

    file.commit()
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{process_receipt, ProcessOptions};
    use crate::receipt::{Item, Receipt};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_batch() -> Batch {
        let valid = Receipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            total: "6.49".to_string(),
            items: vec![Item::new("Mountain Dew 12PK", "6.49")],
            ..Default::default()
        };
        let invalid = Receipt {
            items: vec![],
            ..valid.clone()
        };
        let options = ProcessOptions::default();
        Batch {
            processed: vec![
                process_receipt(PathBuf::from("valid.json"), valid, &options),
                process_receipt(PathBuf::from("invalid.json"), invalid, &options),
            ],
            failed: vec![],
        }
    }

    #[test]
    fn test_report_summary() {
        let batch = sample_batch();
        let report = Report::new(&batch);
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.valid, 1);
        assert_eq!(report.summary.invalid, 1);
        assert_eq!(report.summary.failed, 0);
        assert_eq!(report.summary.points, 12);
    }

    #[test]
    fn test_report_lists_failed_files() {
        let mut batch = sample_batch();
        batch.failed.push(FailedFile {
            source: PathBuf::from("broken.json"),
            error: "Failed to parse receipt JSON in broken.json".to_string(),
        });

        let report = Report::new(&batch);
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.failed, 1);

        let json: serde_json::Value = serde_json::from_str(&format_json(&batch).unwrap()).unwrap();
        assert_eq!(json["failed"][0]["source"], "broken.json");
        assert_eq!(json["summary"]["failed"], 1);
    }

    #[test]
    fn test_format_json() {
        let batch = sample_batch();
        let json: serde_json::Value = serde_json::from_str(&format_json(&batch).unwrap()).unwrap();

        let first = &json["receipts"][0];
        assert_eq!(first["source"], "valid.json");
        assert_eq!(first["verdict"]["status"], "valid");
        assert_eq!(first["receipt"]["points"], 12);
        assert_eq!(first["receipt"]["purchaseDate"], "2022-01-01");
        assert!(first["receipt"]["id"].is_string());
        assert_eq!(first["points"]["breakdown"]["rules"][0]["rule"], "retailer_name");

        let second = &json["receipts"][1];
        assert_eq!(second["verdict"]["status"], "invalid");
        assert_eq!(
            second["verdict"]["errors"][0],
            "error processing receipt: items cannot be empty"
        );
        assert!(second.get("points").is_none());

        assert_eq!(json["summary"]["points"], 12);
    }

    #[test]
    fn test_save_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        save_report(&path, &sample_batch()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["receipts"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_save_report_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, "stale").unwrap();

        let mut batch = sample_batch();
        batch.processed.truncate(1);
        save_report(&path, &batch).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"total\": 1"));
    }
}
