use crate::domain::plan::ActionPlan;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingRoute {
    Bootstrap,
    Investor,
    Hybrid,
}

impl FundingRoute {
    pub fn as_str(self) -> &'static str {
        match self {
            FundingRoute::Bootstrap => "bootstrap",
            FundingRoute::Investor => "investor",
            FundingRoute::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for FundingRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-number scores in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteScores {
    pub bootstrap: f64,
    pub investor: f64,
    pub hybrid: f64,
}

/// Which way a single factor leans.
///
/// `Positive` leans towards bootstrapping, `Negative` towards investors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonImpact {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReason {
    pub factor: String,
    pub weight: f64,
    pub impact: ReasonImpact,
    pub bootstrap_score: f64,
    pub investor_score: f64,
    pub message: String,
}

impl RouteReason {
    pub fn spread(&self) -> f64 {
        (self.bootstrap_score - self.investor_score).abs()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub recommendation: FundingRoute,
    pub scores: RouteScores,
    /// 20..=95.
    pub confidence: u32,
    pub reasons: Vec<RouteReason>,
    pub warnings: Vec<String>,
    pub alternatives: Vec<String>,
    pub action_plan: ActionPlan,
}
