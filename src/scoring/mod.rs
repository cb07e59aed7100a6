pub mod engine;
pub mod rules;

pub use engine::{
    calculate_points, score_receipt, PointsBreakdown, PointsResult, PointsRule, RuleContribution,
};
