pub mod datetime;
pub mod text;

pub use datetime::{
    normalize_date, normalize_time, parse_canonical_date, parse_canonical_time, NormalizeError,
};
pub use text::clean_description;

use crate::receipt::Receipt;

/// Best-effort cleanup of a receipt before validation.
///
/// Dates and times are re-rendered in canonical form and item descriptions
/// are whitespace-normalized. A date or time that matches no accepted format
/// is left untouched; its error is returned so the caller can report it.
pub fn normalize_receipt(receipt: &mut Receipt) -> Vec<NormalizeError> {
    let mut errors = Vec::new();

    match normalize_date(&receipt.purchase_date) {
        Ok(date) => receipt.purchase_date = date,
        Err(e) => errors.push(e),
    }

    match normalize_time(&receipt.purchase_time) {
        Ok(time) => receipt.purchase_time = time,
        Err(e) => errors.push(e),
    }

    for item in &mut receipt.items {
        item.short_description = clean_description(&item.short_description);
    }

    errors
}
