use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ceiling per Berkus factor, in EUR.
pub const BERKUS_FACTOR_CAP: f64 = 500_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationMethod {
    Berkus,
    Scorecard,
    VcMethod,
    Dcf,
    Comparables,
}

impl ValuationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ValuationMethod::Berkus => "berkus",
            ValuationMethod::Scorecard => "scorecard",
            ValuationMethod::VcMethod => "vc_method",
            ValuationMethod::Dcf => "dcf",
            ValuationMethod::Comparables => "comparables",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationMethodResult {
    pub method: ValuationMethod,
    /// Currency units.
    pub value: f64,
    pub confidence: f64,
    pub breakdown: BTreeMap<String, f64>,
    pub notes: Vec<String>,
}

/// Scores are 0..=100, as judged by the founder. Each factor is worth at most
/// [`BERKUS_FACTOR_CAP`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BerkusInput {
    pub sound_idea: f64,
    pub prototype: f64,
    pub quality_team: f64,
    pub strategic_relationships: f64,
    pub product_rollout: f64,
}

impl BerkusInput {
    pub fn factors(&self) -> [(&'static str, f64); 5] {
        [
            ("sound_idea", self.sound_idea),
            ("prototype", self.prototype),
            ("quality_team", self.quality_team),
            ("strategic_relationships", self.strategic_relationships),
            ("product_rollout", self.product_rollout),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardFactor {
    pub name: String,
    /// Percent; a full set is expected to sum to 100.
    pub weight: f64,
    /// 0..=100.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardInput {
    /// Average pre-money valuation of comparable funded startups in the region.
    pub baseline_valuation: f64,
    pub factors: Vec<ScorecardFactor>,
}

/// Scores for the seven standard scorecard factors, 0..=100 each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorecardScores {
    pub team_strength: f64,
    pub market_size: f64,
    pub product_technology: f64,
    pub competition: f64,
    pub marketing_sales: f64,
    pub funding_need: f64,
    pub other: f64,
}

impl ScorecardInput {
    pub const STANDARD_WEIGHTS: [(&'static str, f64); 7] = [
        ("team_strength", 30.0),
        ("market_size", 25.0),
        ("product_technology", 15.0),
        ("competition", 10.0),
        ("marketing_sales", 10.0),
        ("funding_need", 5.0),
        ("other", 5.0),
    ];

    pub fn standard(baseline_valuation: f64, scores: ScorecardScores) -> Self {
        let values = [
            scores.team_strength,
            scores.market_size,
            scores.product_technology,
            scores.competition,
            scores.marketing_sales,
            scores.funding_need,
            scores.other,
        ];
        let factors = Self::STANDARD_WEIGHTS
            .iter()
            .zip(values)
            .map(|((name, weight), score)| ScorecardFactor {
                name: (*name).to_string(),
                weight: *weight,
                score,
            })
            .collect();
        Self {
            baseline_valuation,
            factors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VcMethodInput {
    pub exit_value: f64,
    pub years_to_exit: f64,
    /// Target multiple on invested capital, e.g. 10.0 for 10x.
    pub expected_return_multiple: f64,
    pub investment_amount: f64,
    /// Expected dilution from future rounds, in percent.
    #[serde(default)]
    pub dilution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfInput {
    /// Projected free cash flow per year, first year first.
    pub cash_flows: Vec<f64>,
    /// Percent, e.g. 35.0.
    pub discount_rate: f64,
    /// Percent, e.g. 3.0.
    pub terminal_growth_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Revenue,
    Arr,
    Users,
    Gmv,
}

impl MetricType {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Revenue => "revenue",
            MetricType::Arr => "arr",
            MetricType::Users => "users",
            MetricType::Gmv => "gmv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparableCompany {
    pub name: String,
    pub valuation: f64,
    pub metric_type: MetricType,
    pub metric_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparablesInput {
    pub metric_type: MetricType,
    pub your_metric: f64,
    #[serde(default)]
    pub comparables: Vec<ComparableCompany>,
    #[serde(default = "default_adjustment_factor")]
    pub adjustment_factor: f64,
}

fn default_adjustment_factor() -> f64 {
    1.0
}

/// A single valuation call; the tag selects the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "input", rename_all = "snake_case")]
pub enum ValuationRequest {
    Berkus(BerkusInput),
    Scorecard(ScorecardInput),
    VcMethod(VcMethodInput),
    Dcf(DcfInput),
    Comparables(ComparablesInput),
}

impl ValuationRequest {
    pub fn method(&self) -> ValuationMethod {
        match self {
            ValuationRequest::Berkus(_) => ValuationMethod::Berkus,
            ValuationRequest::Scorecard(_) => ValuationMethod::Scorecard,
            ValuationRequest::VcMethod(_) => ValuationMethod::VcMethod,
            ValuationRequest::Dcf(_) => ValuationMethod::Dcf,
            ValuationRequest::Comparables(_) => ValuationMethod::Comparables,
        }
    }
}

/// Aggregate view over several method results with a positive value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub methods: Vec<ValuationMethod>,
    pub low: f64,
    pub high: f64,
    pub mean: f64,
    pub confidence_weighted: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_is_tagged_by_method() {
        let req: ValuationRequest = serde_json::from_value(json!({
            "method": "vc_method",
            "input": {
                "exit_value": 50_000_000.0,
                "years_to_exit": 5.0,
                "expected_return_multiple": 10.0,
                "investment_amount": 1_000_000.0
            }
        }))
        .unwrap();
        assert_eq!(req.method(), ValuationMethod::VcMethod);
        let ValuationRequest::VcMethod(input) = req else {
            panic!("expected vc method input");
        };
        assert_eq!(input.dilution, 0.0);
    }

    #[test]
    fn standard_scorecard_weights_sum_to_100() {
        let total: f64 = ScorecardInput::STANDARD_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert_eq!(total, 100.0);

        let input = ScorecardInput::standard(
            2_000_000.0,
            ScorecardScores {
                team_strength: 80.0,
                market_size: 70.0,
                product_technology: 60.0,
                competition: 50.0,
                marketing_sales: 40.0,
                funding_need: 30.0,
                other: 20.0,
            },
        );
        assert_eq!(input.factors.len(), 7);
        assert_eq!(input.factors[0].name, "team_strength");
        assert_eq!(input.factors[0].score, 80.0);
        assert_eq!(input.factors[6].weight, 5.0);
    }
}
