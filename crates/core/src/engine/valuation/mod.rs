//! Five independent early-stage valuation methods.
//!
//! Each calculator is a pure function over its own input shape and never
//! fails: unusable input yields a zero-value, zero-confidence result with a
//! note. Only DCF has an explicit validator, which callers run first.

pub mod berkus;
pub mod comparables;
pub mod dcf;
pub mod scorecard;
pub mod vc_method;

use crate::domain::valuation::{
    ValuationMethod, ValuationMethodResult, ValuationRequest, ValuationSummary,
};
use std::collections::BTreeMap;

pub use berkus::calculate_berkus;
pub use comparables::calculate_comparables;
pub use dcf::{calculate_dcf, validate_dcf_input};
pub use scorecard::calculate_scorecard;
pub use vc_method::calculate_vc_method;

pub fn compute_valuation(request: &ValuationRequest) -> ValuationMethodResult {
    let result = match request {
        ValuationRequest::Berkus(input) => calculate_berkus(input),
        ValuationRequest::Scorecard(input) => calculate_scorecard(input),
        ValuationRequest::VcMethod(input) => calculate_vc_method(input),
        ValuationRequest::Dcf(input) => calculate_dcf(input),
        ValuationRequest::Comparables(input) => calculate_comparables(input),
    };
    tracing::debug!(
        method = result.method.as_str(),
        value = result.value,
        confidence = result.confidence,
        "valuation computed"
    );
    result
}

/// Low/high/mean over the results that produced a positive value.
pub fn summarize(results: &[ValuationMethodResult]) -> Option<ValuationSummary> {
    let usable: Vec<&ValuationMethodResult> = results
        .iter()
        .filter(|r| r.value.is_finite() && r.value > 0.0)
        .collect();
    if usable.is_empty() {
        return None;
    }

    let low = usable.iter().map(|r| r.value).fold(f64::INFINITY, f64::min);
    let high = usable.iter().map(|r| r.value).fold(f64::NEG_INFINITY, f64::max);
    let mean = usable.iter().map(|r| r.value).sum::<f64>() / usable.len() as f64;

    let total_confidence: f64 = usable.iter().map(|r| r.confidence.max(0.0)).sum();
    let confidence_weighted = if total_confidence > 0.0 {
        usable
            .iter()
            .map(|r| r.value * r.confidence.max(0.0))
            .sum::<f64>()
            / total_confidence
    } else {
        mean
    };

    Some(ValuationSummary {
        methods: usable.iter().map(|r| r.method).collect(),
        low,
        high,
        mean,
        confidence_weighted,
    })
}

pub(crate) fn empty_result(method: ValuationMethod, note: impl Into<String>) -> ValuationMethodResult {
    ValuationMethodResult {
        method,
        value: 0.0,
        confidence: 0.0,
        breakdown: BTreeMap::new(),
        notes: vec![note.into()],
    }
}
