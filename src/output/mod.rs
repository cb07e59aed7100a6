pub mod formatter;
pub mod report;

pub use formatter::{
    format_breakdown, format_sku, format_summary, format_table, format_tsv, should_use_colors,
};
pub use report::{format_json, save_report, Report, ReportSummary};
