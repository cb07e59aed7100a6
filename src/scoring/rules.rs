use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub const ROUND_TOTAL_BONUS: u64 = 25;
pub const WHOLE_DOLLAR_BONUS: u64 = 50;
pub const POINTS_PER_ITEM_PAIR: u64 = 5;
pub const ODD_DAY_BONUS: u64 = 6;
pub const AFTERNOON_BONUS: u64 = 10;

/// Bonus window in minutes after midnight, exclusive on both ends.
pub const AFTERNOON_START_MINUTES: u32 = 14 * 60;
pub const AFTERNOON_END_MINUTES: u32 = 16 * 60;

/// One point per letter or digit in the retailer name.
pub fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(|c| c.is_alphanumeric()).count() as u64
}

/// 25 points for a multiple of 0.25, 75 when the total has no cents.
pub fn total_points(total: Decimal) -> u64 {
    let quarter = Decimal::new(25, 2);
    if !(total % quarter).is_zero() {
        return 0;
    }

    if total.fract().is_zero() {
        ROUND_TOTAL_BONUS + WHOLE_DOLLAR_BONUS
    } else {
        ROUND_TOTAL_BONUS
    }
}

/// 5 points for every two items.
pub fn item_pair_points(item_count: usize) -> u64 {
    (item_count / 2) as u64 * POINTS_PER_ITEM_PAIR
}

/// Whether a (cleaned) description length earns the price bonus.
pub fn description_qualifies(description: &str) -> bool {
    let len = description.chars().count();
    len > 0 && len % 3 == 0
}

/// `ceil(price * 0.2)` when the description length is a multiple of 3.
///
/// Prices accepted by validation are bounded, so the result always fits.
pub fn description_points(description: &str, price: Decimal) -> u64 {
    if !description_qualifies(description) {
        return 0;
    }
    (price * Decimal::new(2, 1))
        .ceil()
        .to_u64()
        .unwrap_or(u64::MAX)
}

pub fn purchase_day_points(date: NaiveDate) -> u64 {
    if date.day() % 2 == 1 {
        ODD_DAY_BONUS
    } else {
        0
    }
}

pub fn in_afternoon_window(time: NaiveTime) -> bool {
    let minutes = time.hour() * 60 + time.minute();
    minutes > AFTERNOON_START_MINUTES && minutes < AFTERNOON_END_MINUTES
}

pub fn purchase_time_points(time: NaiveTime) -> u64 {
    if in_afternoon_window(time) {
        AFTERNOON_BONUS
    } else {
        0
    }
}
