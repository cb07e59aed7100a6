pub mod money;
pub mod types;

pub use money::{parse_amount, round_cents, MAX_WHOLE_AMOUNT};
pub use types::{Item, Receipt};
