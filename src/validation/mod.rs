pub mod checks;
pub mod error;

pub use checks::{collect_violations, validate_receipt, CheckedReceipt};
pub use error::ReceiptError;
