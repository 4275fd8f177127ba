//! Aggregated, explainable confidence score.
//!
//! Four signals are blended with fixed weights: disclosure tier, how much of
//! the optional profile is filled, agreement between valuation methods, and
//! the quality of the market data.

use crate::domain::confidence::{ConfidenceExplanation, ConfidenceFactors, ConfidenceSignal};
use crate::domain::input::{DataSharingTier, FounderInput};
use crate::domain::valuation::ValuationMethodResult;
use crate::engine::rules::{self, Rule};
use crate::engine::stats;

pub const TIER_WEIGHT: f64 = 0.35;
pub const COMPLETENESS_WEIGHT: f64 = 0.25;
pub const AGREEMENT_WEIGHT: f64 = 0.25;
pub const MARKET_WEIGHT: f64 = 0.15;

const DEFAULT_AGREEMENT: f64 = 0.5;
const MIN_CONFIDENCE: f64 = 20.0;
const MAX_CONFIDENCE: f64 = 95.0;

type FieldCheck = (&'static str, fn(&FounderInput) -> bool);

/// Optional fields counted towards completeness, grouped by section.
pub const PROJECT_FIELDS: &[FieldCheck] = &[
    ("category", |i| i.project.category.is_some()),
    ("stage", |i| i.project.stage.is_some()),
    ("target_customer", |i| i.project.target_customer.is_some()),
    ("monthly_revenue", |i| i.project.monthly_revenue.is_some()),
    ("active_users", |i| i.project.active_users.is_some()),
    ("monthly_growth_rate", |i| i.project.monthly_growth_rate.is_some()),
];

pub const PERSONAL_FIELDS: &[FieldCheck] = &[
    ("team_size", |i| i.personal.team_size.is_some()),
    ("experience", |i| i.personal.experience.is_some()),
    ("commitment", |i| i.personal.commitment.is_some()),
    ("runway_months", |i| i.personal.runway_months.is_some()),
    ("financial_cushion", |i| i.personal.financial_cushion.is_some()),
    ("risk_tolerance", |i| i.personal.risk_tolerance.is_some()),
];

pub const GOAL_FIELDS: &[FieldCheck] = &[
    ("exit_goal", |i| i.goals.exit_goal.is_some()),
    ("growth_speed", |i| i.goals.growth_speed.is_some()),
    ("control_importance", |i| i.goals.control_importance.is_some()),
    ("time_horizon_years", |i| i.goals.time_horizon_years.is_some()),
];

/// Input to the explanation templates.
pub struct ExplanationContext {
    pub tier: DataSharingTier,
    pub factors: ConfidenceFactors,
}

pub const EXPLANATION_RULES: &[Rule<ExplanationContext>] = &[
    Rule {
        id: "tier_minimal",
        applies: |c| c.tier == DataSharingTier::Minimal,
        message: "Minimal data sharing limits how precise this analysis can be.",
    },
    Rule {
        id: "tier_basic",
        applies: |c| c.tier == DataSharingTier::Basic,
        message: "Basic data sharing gives a reasonable starting point.",
    },
    Rule {
        id: "tier_detailed",
        applies: |c| c.tier == DataSharingTier::Detailed,
        message: "Detailed data sharing supports a well-grounded analysis.",
    },
    Rule {
        id: "tier_full",
        applies: |c| c.tier == DataSharingTier::Full,
        message: "Full data sharing supports the most reliable analysis.",
    },
    Rule {
        id: "completeness_low",
        applies: |c| c.factors.data_completeness.value < 0.5,
        message: "Many optional fields are empty; filling them in will sharpen the results.",
    },
    Rule {
        id: "completeness_high",
        applies: |c| c.factors.data_completeness.value > 0.8,
        message: "Your profile is nearly complete.",
    },
    Rule {
        id: "agreement_low",
        applies: |c| c.factors.method_agreement.value < 0.5,
        message: "Valuation methods disagree significantly; treat the range with caution.",
    },
    Rule {
        id: "agreement_high",
        applies: |c| c.factors.method_agreement.value > 0.7,
        message: "Valuation methods broadly agree.",
    },
    Rule {
        id: "market_thin",
        applies: |c| c.factors.market_data_quality.value < 0.4,
        message: "Market data is thin; add competitors and market sizing.",
    },
];

pub fn compute_confidence(
    tier: DataSharingTier,
    input: &FounderInput,
    valuations: Option<&[ValuationMethodResult]>,
) -> ConfidenceExplanation {
    let factors = ConfidenceFactors {
        tier_factor: ConfidenceSignal {
            weight: TIER_WEIGHT,
            value: tier_factor(tier),
        },
        data_completeness: ConfidenceSignal {
            weight: COMPLETENESS_WEIGHT,
            value: data_completeness(input),
        },
        method_agreement: ConfidenceSignal {
            weight: AGREEMENT_WEIGHT,
            value: valuations.map_or(DEFAULT_AGREEMENT, method_agreement),
        },
        market_data_quality: ConfidenceSignal {
            weight: MARKET_WEIGHT,
            value: market_data_quality(input),
        },
    };

    let raw = factors.tier_factor.contribution()
        + factors.data_completeness.contribution()
        + factors.method_agreement.contribution()
        + factors.market_data_quality.contribution();
    let confidence = (raw * 100.0).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE).round() as u32;

    let explanations = rules::evaluate(EXPLANATION_RULES, &ExplanationContext { tier, factors });

    ConfidenceExplanation {
        confidence,
        factors,
        explanations,
    }
}

/// Midpoint of the tier's confidence range, as a fraction.
pub fn tier_factor(tier: DataSharingTier) -> f64 {
    let (low, high) = tier.confidence_range();
    (low + high) as f64 / 2.0 / 100.0
}

pub fn data_completeness(input: &FounderInput) -> f64 {
    let fields = PROJECT_FIELDS
        .iter()
        .chain(PERSONAL_FIELDS)
        .chain(GOAL_FIELDS);
    let (filled, total) = fields.fold((0usize, 0usize), |(filled, total), (_, is_set)| {
        (filled + usize::from(is_set(input)), total + 1)
    });
    filled as f64 / total as f64
}

/// `1 - coefficient of variation` over positive valuation values, clamped to 0.3..=0.9.
pub fn method_agreement(valuations: &[ValuationMethodResult]) -> f64 {
    let values: Vec<f64> = valuations
        .iter()
        .map(|v| v.value)
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();
    if values.len() < 2 {
        return DEFAULT_AGREEMENT;
    }
    let (Some(mean), Some(sd)) = (stats::mean(&values), stats::std_dev(&values)) else {
        return DEFAULT_AGREEMENT;
    };
    (1.0 - sd / mean).clamp(0.3, 0.9)
}

pub fn market_data_quality(input: &FounderInput) -> f64 {
    let market = &input.market;
    let competitors = market
        .competitors
        .iter()
        .filter(|c| !c.trim().is_empty())
        .count();

    let mut quality = 0.5;
    if competitors >= 1 {
        quality += 0.1;
    }
    if competitors >= 3 {
        quality += 0.1;
    }
    if market.tam.is_some() {
        quality += 0.1;
    }
    if market.sam.is_some() {
        quality += 0.05;
    }
    if market.som.is_some() {
        quality += 0.05;
    }
    if market.market_timing.is_some() {
        quality += 0.05;
    }
    if market.market_type.is_some() {
        quality += 0.05;
    }
    f64::min(quality, 1.0)
}
