use super::empty_result;
use crate::domain::valuation::{ComparablesInput, ValuationMethod, ValuationMethodResult};
use crate::engine::stats;
use std::collections::BTreeMap;

const BASE_CONFIDENCE: f64 = 50.0;
const PER_COMPARABLE_BONUS: f64 = 5.0;
const MAX_COMPARABLE_BONUS: f64 = 20.0;
const SPREAD_ADJUSTMENT: f64 = 15.0;
const MIN_CONFIDENCE: f64 = 30.0;
const MAX_CONFIDENCE: f64 = 80.0;

/// Applies the median valuation multiple of matching comparables to your metric.
pub fn calculate_comparables(input: &ComparablesInput) -> ValuationMethodResult {
    let multiples: Vec<f64> = input
        .comparables
        .iter()
        .filter(|c| c.metric_type == input.metric_type)
        .filter(|c| c.metric_value.is_finite() && c.metric_value > 0.0)
        .filter(|c| c.valuation.is_finite() && c.valuation > 0.0)
        .map(|c| c.valuation / c.metric_value)
        .collect();

    let Some(median) = stats::median(&multiples) else {
        let note = if input.comparables.is_empty() {
            "No comparable companies were supplied.".to_string()
        } else {
            format!(
                "None of the {} comparables report a positive valuation and {} metric.",
                input.comparables.len(),
                input.metric_type.as_str()
            )
        };
        return empty_result(ValuationMethod::Comparables, note);
    };

    let mut notes = Vec::new();
    let adjustment = if input.adjustment_factor.is_finite() && input.adjustment_factor > 0.0 {
        input.adjustment_factor
    } else {
        notes.push("The adjustment factor must be positive; 1.0 was used instead.".to_string());
        1.0
    };
    let your_metric = if input.your_metric.is_finite() {
        input.your_metric.max(0.0)
    } else {
        0.0
    };

    let min_multiple = multiples.iter().copied().fold(f64::INFINITY, f64::min);
    let max_multiple = multiples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let value = your_metric * median * adjustment;

    let mut confidence =
        BASE_CONFIDENCE + (PER_COMPARABLE_BONUS * multiples.len() as f64).min(MAX_COMPARABLE_BONUS);
    if median > 0.0 {
        let spread = (max_multiple - min_multiple) / median;
        if spread < 0.5 {
            confidence += SPREAD_ADJUSTMENT;
            notes.push("Comparable multiples are tightly clustered.".to_string());
        } else if spread > 2.0 {
            confidence -= SPREAD_ADJUSTMENT;
            notes.push("Comparable multiples vary widely; the range matters more than the midpoint.".to_string());
        }
    }
    if multiples.len() < input.comparables.len() {
        notes.push(format!(
            "{} of {} comparables were excluded for a different metric or a non-positive value.",
            input.comparables.len() - multiples.len(),
            input.comparables.len()
        ));
    }
    if your_metric == 0.0 {
        notes.push("Your own metric is zero, so the multiple has nothing to apply to.".to_string());
    }

    let breakdown = BTreeMap::from([
        ("median_multiple".to_string(), median),
        ("min_multiple".to_string(), min_multiple),
        ("max_multiple".to_string(), max_multiple),
        ("range_low".to_string(), your_metric * min_multiple * adjustment),
        ("range_high".to_string(), your_metric * max_multiple * adjustment),
        ("comparables_used".to_string(), multiples.len() as f64),
    ]);

    ValuationMethodResult {
        method: ValuationMethod::Comparables,
        value,
        confidence: confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
        breakdown,
        notes,
    }
}
