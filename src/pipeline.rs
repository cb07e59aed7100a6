use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::normalize::normalize_receipt;
use crate::receipt::Receipt;
use crate::scoring::{calculate_points, PointsResult};
use crate::validation::{collect_violations, validate_receipt, ReceiptError};

/// What to do with each receipt after it is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Score valid receipts. When false, receipts are only validated.
    pub score: bool,
    /// Give each scored receipt a fresh UUID v4
    pub assign_ids: bool,
    /// Report every violation rather than the first
    pub collect_all_errors: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            score: true,
            assign_ids: true,
            collect_all_errors: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "errors", rename_all = "lowercase")]
pub enum Verdict {
    Valid,
    #[serde(serialize_with = "serialize_errors")]
    Invalid(Vec<ReceiptError>),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn errors(&self) -> &[ReceiptError] {
        match self {
            Verdict::Valid => &[],
            Verdict::Invalid(errors) => errors,
        }
    }
}

fn serialize_errors<S>(errors: &[ReceiptError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(errors.iter().map(|e| e.to_string()))
}

/// One receipt after it went through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedReceipt {
    pub source: PathBuf,
    pub receipt: Receipt,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<PointsResult>,
}

impl ProcessedReceipt {
    pub fn is_valid(&self) -> bool {
        self.verdict.is_valid()
    }
}

/// Expand the given paths into receipt files.
///
/// Arguments containing glob metacharacters are expanded; others are taken
/// as-is. A pattern that matches nothing is an error.
pub fn expand_paths(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(pattern));
            continue;
        }

        let before = paths.len();
        for entry in glob::glob(pattern).with_context(|| format!("Invalid glob pattern '{}'", pattern))? {
            let path = entry.with_context(|| format!("Failed to read a match of '{}'", pattern))?;
            if path.is_file() {
                paths.push(path);
            }
        }

        if paths.len() == before {
            anyhow::bail!("No receipt files match '{}'", pattern);
        }
    }

    Ok(paths)
}

/// Read a receipt from a JSON file.
pub fn load_receipt(path: &Path) -> Result<Receipt> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open receipt file at {}", path.display()))?;

    let receipt: Receipt = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse receipt JSON in {}", path.display()))?;

    Ok(receipt)
}

/// Normalize, validate and (optionally) score one receipt.
pub fn process_receipt(source: PathBuf, mut receipt: Receipt, options: &ProcessOptions) -> ProcessedReceipt {
    for error in normalize_receipt(&mut receipt) {
        warn!(source = %source.display(), "{}", error);
    }
    debug!(source = %source.display(), receipt = %receipt.short_ref(), "normalized");

    let (verdict, points) = match validate_receipt(&receipt) {
        Ok(checked) => {
            let points = options.score.then(|| calculate_points(&checked));
            (Verdict::Valid, points)
        }
        Err(first) => {
            let errors = if options.collect_all_errors {
                collect_violations(&receipt)
            } else {
                vec![first]
            };
            (Verdict::Invalid(errors), None)
        }
    };

    match &verdict {
        Verdict::Valid => debug!(source = %source.display(), "valid"),
        Verdict::Invalid(errors) => {
            debug!(source = %source.display(), violations = errors.len(), "rejected")
        }
    }

    if let Some(ref result) = points {
        receipt.points = result.points;
        if options.assign_ids {
            receipt.id = Some(Uuid::new_v4().to_string());
        }
        debug!(
            source = %source.display(),
            points = result.points,
            id = receipt.id.as_deref().unwrap_or("-"),
            "scored"
        );
    }

    ProcessedReceipt {
        source,
        receipt,
        verdict,
        points,
    }
}

/// A receipt file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub source: PathBuf,
    pub error: String,
}

/// Everything a run produced, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Batch {
    pub processed: Vec<ProcessedReceipt>,
    pub failed: Vec<FailedFile>,
}

impl Batch {
    pub fn all_valid(&self) -> bool {
        self.processed.iter().all(ProcessedReceipt::is_valid)
    }
}

/// Load and process every file, in order.
///
/// A file that cannot be read or parsed is recorded in `failed` and the
/// rest of the batch still runs.
pub fn process_files(paths: &[PathBuf], options: &ProcessOptions) -> Batch {
    let mut batch = Batch::default();

    for path in paths {
        match load_receipt(path) {
            Ok(receipt) => batch
                .processed
                .push(process_receipt(path.clone(), receipt, options)),
            Err(e) => {
                warn!(source = %path.display(), "{:#}", e);
                batch.failed.push(FailedFile {
                    source: path.clone(),
                    error: format!("{:#}", e),
                });
            }
        }
    }

    let valid = batch.processed.iter().filter(|p| p.is_valid()).count();
    info!(
        total = paths.len(),
        valid,
        invalid = batch.processed.len() - valid,
        failed = batch.failed.len(),
        "processed receipts"
    );

    batch
}
