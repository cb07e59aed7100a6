use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::sku::Sku;

/// A point-of-sale receipt as submitted by a client.
///
/// Amounts, dates and times stay as the client sent them; they are parsed
/// during validation. `points` and `id` are never read from input.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(default)]
    pub retailer: String,
    #[serde(default)]
    pub purchase_date: String,
    #[serde(default)]
    pub purchase_time: String,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_deserializing)]
    pub points: u64,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub short_description: String,
    // Older clients send `price`
    #[serde(default, alias = "price")]
    pub price_paid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<NonZeroU32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,
}

impl Item {
    pub fn new(short_description: &str, price_paid: &str) -> Self {
        Item {
            short_description: short_description.to_string(),
            price_paid: price_paid.to_string(),
            quantity: None,
            sku: None,
        }
    }
}

impl Receipt {
    /// Short human reference, e.g. "Target 2022-01-01 13:01"
    pub fn short_ref(&self) -> String {
        format!("{} {} {}", self.retailer, self.purchase_date, self.purchase_time)
    }
}
