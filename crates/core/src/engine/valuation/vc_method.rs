use super::empty_result;
use crate::domain::valuation::{ValuationMethod, ValuationMethodResult, VcMethodInput};
use std::collections::BTreeMap;

const BASE_CONFIDENCE: f64 = 60.0;
const MIN_CONFIDENCE: f64 = 35.0;
const MAX_CONFIDENCE: f64 = 80.0;
/// Return multiples are quoted over this many years.
const REFERENCE_HORIZON_YEARS: f64 = 5.0;
const LARGE_EXIT: f64 = 100_000_000.0;

/// Works back from an expected exit to today's pre-money valuation.
///
/// The reported value is the pre-money valuation.
pub fn calculate_vc_method(input: &VcMethodInput) -> ValuationMethodResult {
    let usable = [
        input.exit_value,
        input.years_to_exit,
        input.expected_return_multiple,
        input.investment_amount,
        input.dilution,
    ]
    .iter()
    .all(|v| v.is_finite());
    if !usable
        || input.exit_value <= 0.0
        || input.expected_return_multiple <= 0.0
        || input.years_to_exit < 0.0
    {
        return empty_result(
            ValuationMethod::VcMethod,
            "Exit value and expected return multiple must be positive numbers.",
        );
    }

    let dilution = input.dilution.clamp(0.0, 100.0);
    let investment = input.investment_amount.max(0.0);

    let post_money_today = input.exit_value
        / input
            .expected_return_multiple
            .powf(input.years_to_exit / REFERENCE_HORIZON_YEARS);
    let adjusted_post_money = post_money_today * (1.0 - dilution / 100.0);
    let pre_money = (adjusted_post_money - investment).max(0.0);
    let implied_ownership = if adjusted_post_money > 0.0 {
        investment / adjusted_post_money * 100.0
    } else {
        0.0
    };

    let mut notes = Vec::new();
    let mut confidence = BASE_CONFIDENCE;
    if input.years_to_exit > 7.0 {
        confidence -= 10.0;
        notes.push("Exits more than seven years out are highly uncertain.".to_string());
    }
    if input.years_to_exit < 3.0 {
        confidence -= 5.0;
        notes.push("An exit within three years is unusually fast for an early-stage company.".to_string());
    }
    if input.expected_return_multiple > 20.0 {
        confidence -= 10.0;
        notes.push("Return multiples above 20x imply a very aggressive discount.".to_string());
    }
    if input.exit_value > LARGE_EXIT {
        confidence -= 10.0;
        notes.push("Exit values above 100M are rare; check the assumption against real exits.".to_string());
    }
    if pre_money == 0.0 {
        notes.push("The investment exceeds today's post-money value, leaving no pre-money value.".to_string());
    }
    if implied_ownership > 100.0 {
        notes.push("Implied investor ownership exceeds 100%; the terms are not achievable.".to_string());
    }

    let breakdown = BTreeMap::from([
        ("post_money_today".to_string(), post_money_today),
        ("adjusted_post_money".to_string(), adjusted_post_money),
        ("pre_money".to_string(), pre_money),
        ("implied_ownership".to_string(), implied_ownership),
    ]);

    ValuationMethodResult {
        method: ValuationMethod::VcMethod,
        value: pre_money,
        confidence: confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
        breakdown,
        notes,
    }
}
