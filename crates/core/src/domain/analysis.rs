use crate::domain::confidence::ConfidenceExplanation;
use crate::domain::route::RouteResult;
use crate::domain::valuation::{ValuationMethod, ValuationMethodResult, ValuationSummary};
use serde::{Deserialize, Serialize};

/// A valuation request that was not computed because its input is invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedValuation {
    pub method: ValuationMethod,
    pub errors: Vec<String>,
}

/// Everything one "run analysis" action produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub subject_id: Option<String>,
    pub route: RouteResult,
    pub valuations: Vec<ValuationMethodResult>,
    pub rejected_valuations: Vec<RejectedValuation>,
    pub valuation_summary: Option<ValuationSummary>,
    pub confidence: ConfidenceExplanation,
}
