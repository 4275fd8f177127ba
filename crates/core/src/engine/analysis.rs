use crate::domain::analysis::{AnalysisReport, RejectedValuation};
use crate::domain::contract::AnalysisRequest;
use crate::domain::valuation::ValuationRequest;
use crate::engine::{compute_confidence, compute_route, compute_valuation, validate_dcf_input};
use crate::engine::valuation::summarize;

/// Runs route scoring, every requested valuation and the confidence
/// aggregation for one request.
///
/// DCF requests that fail validation are reported, not computed.
pub fn analyze(request: &AnalysisRequest) -> AnalysisReport {
    let input = &request.input;
    let route = compute_route(input);

    let mut valuations = Vec::with_capacity(request.valuations.len());
    let mut rejected_valuations = Vec::new();
    for valuation in &request.valuations {
        if let ValuationRequest::Dcf(dcf) = valuation {
            let errors = validate_dcf_input(dcf);
            if !errors.is_empty() {
                rejected_valuations.push(RejectedValuation {
                    method: valuation.method(),
                    errors,
                });
                continue;
            }
        }
        valuations.push(compute_valuation(valuation));
    }

    let valuation_summary = summarize(&valuations);
    let confidence = compute_confidence(input.tier, input, Some(&valuations[..]));

    AnalysisReport {
        subject_id: request.subject_id.clone(),
        route,
        valuations,
        rejected_valuations,
        valuation_summary,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::route::FundingRoute;
    use crate::domain::valuation::ValuationMethod;
    use serde_json::json;

    fn request() -> AnalysisRequest {
        serde_json::from_value(json!({
            "subject_id": "founder-1",
            "input": {
                "tier": "detailed",
                "project": {"category": "saas", "stage": "early_revenue"},
                "personal": {"team_size": "two_founders", "runway_months": 14.0},
                "goals": {"exit_goal": "acquisition"},
                "market": {"competitors": ["Acme"], "tam": 2.0e9}
            },
            "valuations": [
                {"method": "berkus", "input": {
                    "sound_idea": 80.0, "prototype": 70.0, "quality_team": 75.0,
                    "strategic_relationships": 60.0, "product_rollout": 65.0
                }},
                {"method": "vc_method", "input": {
                    "exit_value": 40_000_000.0, "years_to_exit": 5.0,
                    "expected_return_multiple": 10.0, "investment_amount": 500_000.0
                }},
                {"method": "dcf", "input": {
                    "cash_flows": [100_000.0], "discount_rate": 30.0, "terminal_growth_rate": 40.0
                }}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn invalid_dcf_is_rejected_not_computed() {
        let report = analyze(&request());
        assert_eq!(report.valuations.len(), 2);
        assert_eq!(report.rejected_valuations.len(), 1);
        assert_eq!(report.rejected_valuations[0].method, ValuationMethod::Dcf);
        assert_eq!(report.rejected_valuations[0].errors.len(), 2);
    }

    #[test]
    fn report_carries_route_summary_and_confidence() {
        let report = analyze(&request());
        assert_eq!(report.subject_id.as_deref(), Some("founder-1"));
        assert_eq!(report.route.action_plan.route, report.route.recommendation);
        let summary = report.valuation_summary.as_ref().unwrap();
        assert_eq!(
            summary.methods,
            vec![ValuationMethod::Berkus, ValuationMethod::VcMethod]
        );
        assert!(summary.low <= summary.high);
        assert!((20..=95).contains(&report.confidence.confidence));
    }

    #[test]
    fn analysis_is_deterministic() {
        let req = request();
        assert_eq!(analyze(&req), analyze(&req));
    }

    #[test]
    fn empty_request_still_produces_a_route() {
        let report = analyze(&AnalysisRequest {
            subject_id: None,
            input: Default::default(),
            valuations: Vec::new(),
        });
        assert_eq!(report.route.recommendation, FundingRoute::Hybrid);
        assert!(report.valuation_summary.is_none());
        assert_eq!(report.confidence.factors.method_agreement.value, 0.5);
    }
}
