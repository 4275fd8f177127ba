use super::empty_result;
use crate::domain::valuation::{ScorecardInput, ValuationMethod, ValuationMethodResult};
use crate::engine::stats::{self, clamp_score};
use std::collections::BTreeMap;

const MIN_CONFIDENCE: f64 = 45.0;
const MAX_CONFIDENCE: f64 = 85.0;

pub fn calculate_scorecard(input: &ScorecardInput) -> ValuationMethodResult {
    if !input.baseline_valuation.is_finite() || input.baseline_valuation <= 0.0 {
        return empty_result(
            ValuationMethod::Scorecard,
            "A positive baseline valuation for comparable funded startups is required.",
        );
    }

    let weights: Vec<f64> = input
        .factors
        .iter()
        .map(|f| if f.weight.is_finite() { f.weight.max(0.0) } else { 0.0 })
        .collect();
    let total_weight: f64 = weights.iter().sum();
    if total_weight <= 0.0 {
        return empty_result(
            ValuationMethod::Scorecard,
            "No weighted factors were supplied.",
        );
    }

    let scores: Vec<f64> = input.factors.iter().map(|f| clamp_score(f.score)).collect();

    let mut notes = Vec::new();
    let mut multiplier: f64 = weights
        .iter()
        .zip(&scores)
        .map(|(w, s)| w / 100.0 * (s / 100.0))
        .sum();
    if (total_weight - 100.0).abs() > 1e-9 {
        multiplier *= 100.0 / total_weight;
        notes.push(format!(
            "Factor weights sum to {total_weight:.0} instead of 100 and were normalized."
        ));
    }

    let mut breakdown = BTreeMap::new();
    for ((factor, w), s) in input.factors.iter().zip(&weights).zip(&scores) {
        breakdown.insert(factor.name.clone(), w / total_weight * (s / 100.0));
    }
    breakdown.insert("multiplier".to_string(), multiplier);

    let spread = stats::std_dev(&scores).unwrap_or(0.0);
    let confidence = (MAX_CONFIDENCE - spread)
        .round()
        .clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

    let value = input.baseline_valuation * multiplier;
    notes.push(format!(
        "Valued at {:.0}% of the regional baseline.",
        multiplier * 100.0
    ));

    ValuationMethodResult {
        method: ValuationMethod::Scorecard,
        value,
        confidence,
        breakdown,
        notes,
    }
}
