use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use super::error::ReceiptError;
use crate::normalize::{parse_canonical_date, parse_canonical_time};
use crate::receipt::{parse_amount, round_cents, Item, Receipt};

/// A receipt that passed every check, with its amounts, date and time parsed.
///
/// Scoring works from these parsed values; nothing downstream re-parses the
/// receipt's strings.
#[derive(Debug, Clone)]
pub struct CheckedReceipt<'a> {
    receipt: &'a Receipt,
    prices: Vec<Decimal>,
    total: Decimal,
    purchase_date: NaiveDate,
    purchase_time: NaiveTime,
}

impl<'a> CheckedReceipt<'a> {
    pub fn retailer(&self) -> &'a str {
        &self.receipt.retailer
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    pub fn purchase_time(&self) -> NaiveTime {
        self.purchase_time
    }

    pub fn item_count(&self) -> usize {
        self.prices.len()
    }

    /// Items paired with their parsed prices, in receipt order.
    pub fn priced_items(&self) -> impl Iterator<Item = (&'a Item, Decimal)> + '_ {
        self.receipt.items.iter().zip(self.prices.iter().copied())
    }
}

/// Validate a receipt, stopping at the first failed check.
///
/// Checks run in a fixed order: retailer, items present, each item
/// (description, price), total parses, total matches the item sum, date,
/// time. The error returned is always the earliest one in that order.
pub fn validate_receipt(receipt: &Receipt) -> Result<CheckedReceipt<'_>, ReceiptError> {
    check_retailer(receipt)?;
    check_has_items(receipt)?;

    let mut prices = Vec::with_capacity(receipt.items.len());
    let mut items_sum = Decimal::ZERO;
    for (index, item) in receipt.items.iter().enumerate() {
        let price = check_item(index, item)?;
        items_sum = add_price(items_sum, index, item, price)?;
        prices.push(price);
    }

    let total = parse_total(&receipt.total)?;
    check_total_matches(total, items_sum)?;
    let purchase_date = parse_date(&receipt.purchase_date)?;
    let purchase_time = parse_time(&receipt.purchase_time)?;

    Ok(CheckedReceipt {
        receipt,
        prices,
        total,
        purchase_date,
        purchase_time,
    })
}

/// Run every check and return all violations, in check order.
///
/// Each item contributes at most one violation. The total/sum comparison is
/// only made when the total and every item price parsed.
pub fn collect_violations(receipt: &Receipt) -> Vec<ReceiptError> {
    let mut errors = Vec::new();

    if let Err(e) = check_retailer(receipt) {
        errors.push(e);
    }
    if let Err(e) = check_has_items(receipt) {
        errors.push(e);
    }

    let mut items_sum = Some(Decimal::ZERO);
    for (index, item) in receipt.items.iter().enumerate() {
        match check_item(index, item) {
            Ok(price) => items_sum = items_sum.and_then(|sum| sum.checked_add(price)),
            Err(e) => {
                errors.push(e);
                items_sum = None;
            }
        }
    }

    match parse_total(&receipt.total) {
        Ok(total) => {
            if let Some(sum) = items_sum.filter(|_| !receipt.items.is_empty()) {
                if let Err(e) = check_total_matches(total, sum) {
                    errors.push(e);
                }
            }
        }
        Err(e) => errors.push(e),
    }

    if let Err(e) = parse_date(&receipt.purchase_date) {
        errors.push(e);
    }
    if let Err(e) = parse_time(&receipt.purchase_time) {
        errors.push(e);
    }

    errors
}

fn check_retailer(receipt: &Receipt) -> Result<(), ReceiptError> {
    if receipt.retailer.is_empty() {
        return Err(ReceiptError::EmptyRetailer);
    }
    Ok(())
}

fn check_has_items(receipt: &Receipt) -> Result<(), ReceiptError> {
    if receipt.items.is_empty() {
        return Err(ReceiptError::EmptyItems);
    }
    Ok(())
}

/// Check one item and return its parsed price.
fn check_item(index: usize, item: &Item) -> Result<Decimal, ReceiptError> {
    if item.short_description.is_empty() {
        return Err(ReceiptError::EmptyDescription { index });
    }
    if item.price_paid.is_empty() {
        return Err(ReceiptError::EmptyPrice { index });
    }
    match parse_amount(&item.price_paid) {
        Some(price) if price > Decimal::ZERO => Ok(price),
        _ => Err(ReceiptError::InvalidPrice {
            index,
            price: item.price_paid.clone(),
        }),
    }
}

fn add_price(
    sum: Decimal,
    index: usize,
    item: &Item,
    price: Decimal,
) -> Result<Decimal, ReceiptError> {
    sum.checked_add(price)
        .ok_or_else(|| ReceiptError::InvalidPrice {
            index,
            price: item.price_paid.clone(),
        })
}

fn parse_total(total: &str) -> Result<Decimal, ReceiptError> {
    parse_amount(total).ok_or_else(|| ReceiptError::InvalidTotal {
        total: total.to_string(),
    })
}

fn check_total_matches(total: Decimal, items_sum: Decimal) -> Result<(), ReceiptError> {
    if round_cents(total) != round_cents(items_sum) {
        return Err(ReceiptError::TotalMismatch { total, items_sum });
    }
    Ok(())
}

fn parse_date(date: &str) -> Result<NaiveDate, ReceiptError> {
    parse_canonical_date(date).ok_or_else(|| ReceiptError::InvalidDate {
        date: date.to_string(),
    })
}

fn parse_time(time: &str) -> Result<NaiveTime, ReceiptError> {
    parse_canonical_time(time).ok_or_else(|| ReceiptError::InvalidTime {
        time: time.to_string(),
    })
}
