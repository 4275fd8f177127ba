use super::empty_result;
use crate::domain::valuation::{DcfInput, ValuationMethod, ValuationMethodResult};
use std::collections::BTreeMap;

/// DCF is a poor fit for early-stage companies, so it starts low.
const BASE_CONFIDENCE: f64 = 45.0;
const MIN_CONFIDENCE: f64 = 25.0;
const MAX_CONFIDENCE: f64 = 60.0;

pub const MIN_PROJECTED_YEARS: usize = 3;
pub const MIN_DISCOUNT_RATE: f64 = 10.0;
pub const MAX_DISCOUNT_RATE: f64 = 60.0;

/// Returns every problem with the input; empty means the input is usable.
pub fn validate_dcf_input(input: &DcfInput) -> Vec<String> {
    let mut errors = Vec::new();

    if input.cash_flows.len() < MIN_PROJECTED_YEARS {
        errors.push(format!(
            "At least {MIN_PROJECTED_YEARS} years of projected cash flows are required (got {}).",
            input.cash_flows.len()
        ));
    }
    if input.cash_flows.iter().any(|cf| !cf.is_finite()) {
        errors.push("Projected cash flows must be finite numbers.".to_string());
    }
    if !(MIN_DISCOUNT_RATE..=MAX_DISCOUNT_RATE).contains(&input.discount_rate) {
        errors.push(format!(
            "Discount rate must be between {MIN_DISCOUNT_RATE:.0}% and {MAX_DISCOUNT_RATE:.0}% (got {}%).",
            input.discount_rate
        ));
    }
    if !input.terminal_growth_rate.is_finite() {
        errors.push("Terminal growth rate must be a finite number.".to_string());
    } else if input.terminal_growth_rate >= input.discount_rate {
        errors.push("Terminal growth rate must be lower than the discount rate.".to_string());
    }

    errors
}

/// Enterprise value from discounted cash flows plus a Gordon-growth terminal value.
///
/// Callers are expected to run [`validate_dcf_input`] first; this function
/// still degrades to a noted result instead of producing infinities.
pub fn calculate_dcf(input: &DcfInput) -> ValuationMethodResult {
    let Some(&last) = input.cash_flows.last() else {
        return empty_result(ValuationMethod::Dcf, "No projected cash flows were supplied.");
    };
    let r = input.discount_rate / 100.0;
    let g = input.terminal_growth_rate / 100.0;
    if !r.is_finite() || r <= -1.0 || input.cash_flows.iter().any(|cf| !cf.is_finite()) {
        return empty_result(
            ValuationMethod::Dcf,
            "Discount rate and cash flows must be finite, with a discount rate above -100%.",
        );
    }

    let mut breakdown = BTreeMap::new();
    let mut notes = Vec::new();

    let mut pv_cash_flows = 0.0;
    for (year, cf) in input.cash_flows.iter().enumerate() {
        let pv = cf / (1.0 + r).powi(year as i32 + 1);
        pv_cash_flows += pv;
        breakdown.insert(format!("pv_year_{}", year + 1), pv);
    }

    let n = input.cash_flows.len() as i32;
    let pv_terminal = if g.is_finite() && g < r {
        let terminal_value = last * (1.0 + g) / (r - g);
        breakdown.insert("terminal_value".to_string(), terminal_value);
        terminal_value / (1.0 + r).powi(n)
    } else {
        notes.push(
            "Terminal growth must be below the discount rate; no terminal value was included."
                .to_string(),
        );
        0.0
    };

    breakdown.insert("pv_cash_flows".to_string(), pv_cash_flows);
    breakdown.insert("pv_terminal_value".to_string(), pv_terminal);

    let enterprise_value = pv_cash_flows + pv_terminal;

    let mut confidence = BASE_CONFIDENCE;
    if input.cash_flows.iter().any(|cf| *cf < 0.0) {
        confidence -= 10.0;
        notes.push("Negative projected cash flows make the result sensitive to assumptions.".to_string());
    }
    if input.discount_rate < 20.0 {
        confidence -= 10.0;
        notes.push("A discount rate below 20% is low for early-stage risk.".to_string());
    }
    if input.terminal_growth_rate > 5.0 {
        confidence -= 10.0;
        notes.push("Terminal growth above 5% exceeds long-run economic growth.".to_string());
    }
    if enterprise_value > 0.0 && pv_terminal / enterprise_value > 0.75 {
        notes.push("Most of the value comes from the terminal value.".to_string());
    }

    ValuationMethodResult {
        method: ValuationMethod::Dcf,
        value: enterprise_value,
        confidence: confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
        breakdown,
        notes,
    }
}
