use crate::domain::route::FundingRoute;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTask {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
}

/// Currency amounts, inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

/// Hours per week, inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPhase {
    pub title: String,
    /// Human readable, e.g. "4-6 weeks".
    pub duration: String,
    pub tasks: Vec<ActionTask>,
    pub budget: BudgetRange,
    pub time_per_week: HoursRange,
    pub milestones: Vec<String>,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub route: FundingRoute,
    pub phases: Vec<ActionPhase>,
    pub total_budget: BudgetRange,
    pub total_duration_months: u32,
    /// Titles of every critical task, in phase order.
    pub critical_path: Vec<String>,
    pub risk_factors: Vec<String>,
    pub success_metrics: Vec<String>,
}
