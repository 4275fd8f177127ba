use crate::domain::valuation::{
    BerkusInput, ValuationMethod, ValuationMethodResult, BERKUS_FACTOR_CAP,
};
use crate::engine::stats::{self, clamp_score};
use std::collections::BTreeMap;

const MIN_CONFIDENCE: f64 = 40.0;
const MAX_CONFIDENCE: f64 = 90.0;
const WEAK_FACTOR: f64 = 25.0;

/// Sums five capped factor contributions. Consistent factor scores earn more
/// confidence than a mix of very strong and very weak ones.
pub fn calculate_berkus(input: &BerkusInput) -> ValuationMethodResult {
    let factors = input.factors();
    let scores: Vec<f64> = factors.iter().map(|(_, s)| clamp_score(*s)).collect();

    let mut breakdown = BTreeMap::new();
    let mut notes = Vec::new();
    let mut value = 0.0;
    for ((name, _), score) in factors.iter().zip(&scores) {
        let contribution = score / 100.0 * BERKUS_FACTOR_CAP;
        value += contribution;
        breakdown.insert((*name).to_string(), contribution);
        if *score < WEAK_FACTOR {
            notes.push(format!(
                "{} scores low ({score:.0}/100) and adds little value.",
                name.replace('_', " ")
            ));
        }
    }

    let spread = stats::std_dev(&scores).unwrap_or(0.0);
    let confidence = (MAX_CONFIDENCE - spread)
        .round()
        .clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

    if value >= 0.8 * 5.0 * BERKUS_FACTOR_CAP {
        notes.push("Close to the Berkus ceiling; pre-revenue valuations rarely go higher.".to_string());
    }
    notes.push("Berkus suits pre-revenue companies; switch to revenue-based methods once sales start.".to_string());

    ValuationMethodResult {
        method: ValuationMethod::Berkus,
        value,
        confidence,
        breakdown,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(scores: [f64; 5]) -> BerkusInput {
        BerkusInput {
            sound_idea: scores[0],
            prototype: scores[1],
            quality_team: scores[2],
            strategic_relationships: scores[3],
            product_rollout: scores[4],
        }
    }

    #[test]
    fn perfect_scores_hit_five_caps() {
        let result = calculate_berkus(&input([100.0; 5]));
        assert_eq!(result.value, 2_500_000.0);
        assert_eq!(result.confidence, 90.0);
        assert_eq!(result.breakdown["quality_team"], 500_000.0);
        assert!((40.0..=90.0).contains(&result.confidence));
    }

    #[test]
    fn contributions_are_proportional() {
        let result = calculate_berkus(&input([50.0, 40.0, 30.0, 20.0, 10.0]));
        assert!((result.value - 750_000.0).abs() < 1e-6);
        assert_eq!(result.breakdown["sound_idea"], 250_000.0);
        assert!(result.notes.iter().any(|n| n.starts_with("product rollout")));
        assert!(result.notes.iter().any(|n| n.starts_with("strategic relationships")));
    }

    #[test]
    fn uneven_scores_lower_confidence() {
        let even = calculate_berkus(&input([60.0; 5]));
        let uneven = calculate_berkus(&input([100.0, 0.0, 100.0, 0.0, 100.0]));
        assert!(uneven.confidence < even.confidence);
        assert_eq!(uneven.confidence, 41.0);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let result = calculate_berkus(&input([150.0, -20.0, 100.0, 100.0, 100.0]));
        assert_eq!(result.value, 2_000_000.0);
    }

    #[test]
    fn cap_cannot_be_overridden_by_the_caller() {
        let input: BerkusInput = serde_json::from_value(json!({
            "sound_idea": 100.0,
            "prototype": 100.0,
            "quality_team": 100.0,
            "strategic_relationships": 100.0,
            "product_rollout": 100.0,
            "per_factor_cap": 1_000_000.0
        }))
        .unwrap();
        let result = calculate_berkus(&input);
        assert_eq!(result.value, 5.0 * BERKUS_FACTOR_CAP);
        assert_eq!(result.breakdown["prototype"], 500_000.0);
    }
}
