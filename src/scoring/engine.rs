use serde::Serialize;

use super::rules::{
    description_points, description_qualifies, in_afternoon_window, item_pair_points,
    purchase_day_points, purchase_time_points, retailer_points, total_points,
};
use crate::receipt::Receipt;
use crate::validation::{validate_receipt, CheckedReceipt, ReceiptError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsRule {
    RetailerName,
    RoundTotal,
    ItemPairs,
    ItemDescriptions,
    OddDay,
    AfternoonWindow,
}

impl PointsRule {
    /// Every rule, in the order contributions are reported.
    pub const ALL: [PointsRule; 6] = [
        PointsRule::RetailerName,
        PointsRule::RoundTotal,
        PointsRule::ItemPairs,
        PointsRule::ItemDescriptions,
        PointsRule::OddDay,
        PointsRule::AfternoonWindow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PointsRule::RetailerName => "Retailer name",
            PointsRule::RoundTotal => "Round total",
            PointsRule::ItemPairs => "Item pairs",
            PointsRule::ItemDescriptions => "Item descriptions",
            PointsRule::OddDay => "Odd day",
            PointsRule::AfternoonWindow => "Afternoon window",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule: PointsRule,
    pub points: u64,
    pub description: String, // e.g. "6 alphanumeric characters in 'Target'"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub rules: Vec<RuleContribution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsResult {
    pub points: u64,
    pub breakdown: PointsBreakdown,
}

impl PointsResult {
    pub fn contribution(&self, rule: PointsRule) -> Option<&RuleContribution> {
        self.breakdown.rules.iter().find(|c| c.rule == rule)
    }
}

/// Score a validated receipt. Every rule is applied and the results summed.
pub fn calculate_points(receipt: &CheckedReceipt<'_>) -> PointsResult {
    let rules: Vec<RuleContribution> = PointsRule::ALL
        .iter()
        .map(|rule| apply_rule(*rule, receipt))
        .collect();

    let points = rules
        .iter()
        .fold(0u64, |sum, contribution| sum.saturating_add(contribution.points));

    PointsResult {
        points,
        breakdown: PointsBreakdown { rules },
    }
}

/// Validate a receipt and store its points on it.
///
/// `points` is the only field written. A rejected receipt is left untouched.
pub fn score_receipt(receipt: &mut Receipt) -> Result<PointsResult, ReceiptError> {
    let result = calculate_points(&validate_receipt(receipt)?);
    receipt.points = result.points;
    Ok(result)
}

fn apply_rule(rule: PointsRule, receipt: &CheckedReceipt<'_>) -> RuleContribution {
    let (points, description) = match rule {
        PointsRule::RetailerName => {
            let points = retailer_points(receipt.retailer());
            (
                points,
                format!("{} alphanumeric characters in '{}'", points, receipt.retailer()),
            )
        }
        PointsRule::RoundTotal => {
            let total = receipt.total();
            let points = total_points(total);
            let description = match points {
                0 => format!("total {} is not a multiple of 0.25", total),
                p if p > super::rules::ROUND_TOTAL_BONUS => {
                    format!("total {} is a whole dollar amount", total)
                }
                _ => format!("total {} is a multiple of 0.25", total),
            };
            (points, description)
        }
        PointsRule::ItemPairs => {
            let count = receipt.item_count();
            (
                item_pair_points(count),
                format!("{} items make {} pairs", count, count / 2),
            )
        }
        PointsRule::ItemDescriptions => {
            let mut points = 0u64;
            let mut qualifying = 0usize;
            for (item, price) in receipt.priced_items() {
                if description_qualifies(&item.short_description) {
                    qualifying += 1;
                    points = points.saturating_add(description_points(&item.short_description, price));
                }
            }
            (
                points,
                format!(
                    "{} of {} descriptions have a length divisible by 3",
                    qualifying,
                    receipt.item_count()
                ),
            )
        }
        PointsRule::OddDay => {
            let date = receipt.purchase_date();
            let points = purchase_day_points(date);
            let parity = if points > 0 { "odd" } else { "even" };
            (points, format!("purchased on {}, day is {}", date, parity))
        }
        PointsRule::AfternoonWindow => {
            let time = receipt.purchase_time();
            let placement = if in_afternoon_window(time) {
                "inside"
            } else {
                "outside"
            };
            (
                purchase_time_points(time),
                format!(
                    "purchased at {}, {} the 14:00-16:00 window",
                    time.format("%H:%M"),
                    placement
                ),
            )
        }
    };

    RuleContribution {
        rule,
        points,
        description,
    }
}
