use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How processed receipts are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned columns, colored on a terminal
    #[default]
    Table,
    /// Tab-separated values for scripting
    Tsv,
    /// Pretty-printed JSON report
    Json,
}

/// Settings read from `config.yaml`.
///
/// Every field is optional; command-line flags take precedence.
///
/// Example YAML:
/// ```yaml
/// format: table
/// breakdown: true
/// collect_all_errors: false
/// assign_ids: true
/// log_level: info
/// report: /tmp/receipts.json
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Show the per-rule points breakdown
    #[serde(default)]
    pub breakdown: Option<bool>,

    /// Report every violation instead of the first
    #[serde(default)]
    pub collect_all_errors: Option<bool>,

    /// Give each scored receipt a fresh UUID (default: true)
    #[serde(default)]
    pub assign_ids: Option<bool>,

    /// Default log level: error, warn, info, debug or trace
    #[serde(default)]
    pub log_level: Option<String>,

    /// Write a JSON report here after every run
    #[serde(default)]
    pub report: Option<PathBuf>,
}

impl Config {
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn breakdown(&self) -> bool {
        self.breakdown.unwrap_or(false)
    }

    pub fn collect_all_errors(&self) -> bool {
        self.collect_all_errors.unwrap_or(false)
    }

    pub fn assign_ids(&self) -> bool {
        self.assign_ids.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }
}
