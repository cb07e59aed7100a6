use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;
use terminal_size::{terminal_size, Width};

use crate::pipeline::{ProcessedReceipt, Verdict};
use crate::scoring::PointsResult;
use crate::sku::Sku;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn status_label(verdict: &Verdict) -> &'static str {
    match verdict {
        Verdict::Valid => "ok",
        Verdict::Invalid(_) => "invalid",
    }
}

/// Format processed receipts as a table with columns: Index, Points, Status,
/// Receipt, Source. Violations and the optional breakdown are indented
/// beneath their row.
pub fn format_table(processed: &[ProcessedReceipt], show_breakdown: bool, use_colors: bool) -> String {
    if processed.is_empty() {
        return "No receipts processed.".to_string();
    }

    let term_width = get_terminal_width();

    // Index: 3 chars ("99."), points: 6 right-aligned, status: 7 ("invalid")
    let index_width = 3;
    let points_width = 6;
    let status_width = 7;
    let separator = "  ";

    let mut lines = Vec::new();
    for (idx, entry) in processed.iter().enumerate() {
        let index_str = format!("{:>2}.", idx + 1);
        let points_str = match &entry.points {
            Some(result) => result.points.to_string(),
            None => "-".to_string(),
        };
        let points_padded = format!("{:>width$}", points_str, width = points_width);
        let status_padded = format!("{:<width$}", status_label(&entry.verdict), width = status_width);
        let source = entry.source.display().to_string();

        let fixed_width =
            index_width + 1 + points_width + status_width + separator.len() * 3 + source.len();
        let reference = entry.receipt.short_ref();
        let reference = match term_width {
            Some(width) if width > fixed_width + 10 => truncate_text(&reference, width - fixed_width),
            Some(_) => truncate_text(&reference, 20),
            None => reference,
        };

        let row = if use_colors {
            let status = if entry.is_valid() {
                status_padded.green().to_string()
            } else {
                status_padded.red().to_string()
            };
            format!(
                "{} {}{}{}{}{}{}{}",
                index_str.dimmed(),
                points_padded.bold(),
                separator,
                status,
                separator,
                reference,
                separator,
                source.underline()
            )
        } else {
            format!(
                "{} {}{}{}{}{}{}{}",
                index_str, points_padded, separator, status_padded, separator, reference, separator, source
            )
        };
        lines.push(row);

        for error in entry.verdict.errors() {
            let message = error.to_string();
            if use_colors {
                lines.push(format!("      {}", message.red()));
            } else {
                lines.push(format!("      {}", message));
            }
        }

        if show_breakdown {
            if let Some(ref result) = entry.points {
                lines.push(format_breakdown(result, use_colors));
            }
        }
    }

    lines.join("\n")
}

/// Format the per-rule points breakdown, one indented line per rule.
pub fn format_breakdown(result: &PointsResult, use_colors: bool) -> String {
    result
        .breakdown
        .rules
        .iter()
        .map(|contribution| {
            let label = format!("{:<18}", contribution.rule.label());
            let points = format!("{:>+5}", contribution.points as i64);
            if use_colors {
                let points = if contribution.points > 0 {
                    points.green().to_string()
                } else {
                    points.dimmed().to_string()
                };
                format!(
                    "      {} {}  {}",
                    label,
                    points,
                    contribution.description.dimmed()
                )
            } else {
                format!("      {} {}  {}", label, points, contribution.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format processed receipts as tab-separated values for scripting
/// Columns: source, status, points, retailer, date, time, id, first error
/// (no headers, no colors; missing values are empty)
pub fn format_tsv(processed: &[ProcessedReceipt]) -> String {
    processed
        .iter()
        .map(|entry| {
            let points = entry
                .points
                .as_ref()
                .map(|result| result.points.to_string())
                .unwrap_or_default();
            let first_error = entry
                .verdict
                .errors()
                .first()
                .map(|e| e.to_string())
                .unwrap_or_default();
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                entry.source.display(),
                status_label(&entry.verdict),
                points,
                entry.receipt.retailer,
                entry.receipt.purchase_date,
                entry.receipt.purchase_time,
                entry.receipt.id.as_deref().unwrap_or_default(),
                first_error
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a parsed SKU with one field per line
pub fn format_sku(sku: &Sku, use_colors: bool) -> String {
    let mut lines = Vec::new();
    if use_colors {
        lines.push(sku.to_string().bold().to_string());
    } else {
        lines.push(sku.to_string());
    }
    lines.push(format!("  Prefix: {}", sku.prefix));
    lines.push(format!("  Category: {}", sku.product_category));
    lines.push(format!("  Manufacturer: {}", sku.manufacturer));
    lines.push(format!("  Product line: {}", sku.product_line));
    if sku.attributes.is_empty() {
        lines.push("  Attributes: none".to_string());
    } else {
        lines.push("  Attributes:".to_string());
        for (key, value) in &sku.attributes {
            lines.push(format!("    {}: {}", key, value));
        }
    }
    lines.push(format!("  Identifier: {}", sku.unique_identifier));
    lines.join("\n")
}

/// One-line run summary for stderr, e.g. "3 receipts (2 valid, 1 invalid), 40 points in 2ms"
pub fn format_summary(processed: &[ProcessedReceipt], elapsed: Duration) -> String {
    let valid = processed.iter().filter(|p| p.is_valid()).count();
    let points: u64 = processed
        .iter()
        .filter_map(|p| p.points.as_ref())
        .fold(0u64, |sum, result| sum.saturating_add(result.points));
    // Millisecond precision is enough for a summary
    let elapsed = Duration::from_millis(elapsed.as_millis() as u64);
    format!(
        "{} receipts ({} valid, {} invalid), {} points in {}",
        processed.len(),
        valid,
        processed.len() - valid,
        points,
        humantime::format_duration(elapsed)
    )
}
