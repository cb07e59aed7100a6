use rust_decimal::Decimal;

/// Why a receipt was rejected. Item positions are shown 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReceiptError {
    #[error("error processing receipt: retailer cannot be empty")]
    EmptyRetailer,

    #[error("error processing receipt: items cannot be empty")]
    EmptyItems,

    #[error("error processing receipt: item {} description cannot be empty", .index + 1)]
    EmptyDescription { index: usize },

    #[error("error processing receipt: item {} price cannot be empty", .index + 1)]
    EmptyPrice { index: usize },

    #[error("error processing receipt: item {} price '{price}' must be a number greater than zero", .index + 1)]
    InvalidPrice { index: usize, price: String },

    #[error("error processing receipt: total '{total}' is not a valid amount")]
    InvalidTotal { total: String },

    #[error("error processing receipt: items add up to {items_sum} but total is {total}")]
    TotalMismatch { total: Decimal, items_sum: Decimal },

    #[error("error processing receipt: purchase date '{date}' is invalid, expected YYYY-MM-DD")]
    InvalidDate { date: String },

    #[error("error processing receipt: purchase time '{time}' is invalid, expected HH:MM")]
    InvalidTime { time: String },
}
