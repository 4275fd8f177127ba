use serde::{Deserialize, Serialize};

/// How much optional detail the founder chose to disclose.
///
/// Ordered from least to most disclosure. Both lookup tables below are product
/// constants shared by route scoring and confidence aggregation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DataSharingTier {
    #[default]
    Minimal,
    Basic,
    Detailed,
    Full,
}

impl DataSharingTier {
    pub const ALL: [DataSharingTier; 4] = [
        DataSharingTier::Minimal,
        DataSharingTier::Basic,
        DataSharingTier::Detailed,
        DataSharingTier::Full,
    ];

    /// Expected confidence band (inclusive) for results at this tier.
    pub fn confidence_range(self) -> (u32, u32) {
        match self {
            DataSharingTier::Minimal => (30, 50),
            DataSharingTier::Basic => (50, 70),
            DataSharingTier::Detailed => (70, 85),
            DataSharingTier::Full => (85, 95),
        }
    }

    /// Multiplier applied to the route recommendation confidence.
    pub fn confidence_multiplier(self) -> f64 {
        match self {
            DataSharingTier::Minimal => 0.6,
            DataSharingTier::Basic => 0.75,
            DataSharingTier::Detailed => 0.9,
            DataSharingTier::Full => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataSharingTier::Minimal => "minimal",
            DataSharingTier::Basic => "basic",
            DataSharingTier::Detailed => "detailed",
            DataSharingTier::Full => "full",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Saas,
    Marketplace,
    Ecommerce,
    Fintech,
    Hardware,
    Biotech,
    ConsumerApp,
    Services,
    Other,
}

impl ProjectCategory {
    /// Categories that usually need significant upfront capital.
    pub fn is_capital_intensive(self) -> bool {
        matches!(self, ProjectCategory::Hardware | ProjectCategory::Biotech)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentStage {
    Idea,
    Prototype,
    Mvp,
    EarlyRevenue,
    Growth,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetCustomer {
    B2b,
    B2c,
    B2b2c,
    Government,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSize {
    Solo,
    TwoFounders,
    SmallTeam,
    LargerTeam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    FirstTime,
    SomeExperience,
    SerialFounder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentLevel {
    FullTime,
    PartTime,
    SideProject,
}

impl CommitmentLevel {
    /// Calendar stretch applied to action plan durations.
    pub fn duration_multiplier(self) -> f64 {
        match self {
            CommitmentLevel::FullTime => 1.0,
            CommitmentLevel::PartTime => 1.5,
            CommitmentLevel::SideProject => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialCushion {
    None,
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitGoal {
    Lifestyle,
    Acquisition,
    Ipo,
    Unsure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthSpeed {
    Steady,
    Moderate,
    Aggressive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketTiming {
    Early,
    Growing,
    Mature,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketType {
    WinnerTakesAll,
    Fragmented,
    Niche,
    Regulated,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectBasics {
    pub category: Option<ProjectCategory>,
    pub stage: Option<DevelopmentStage>,
    pub target_customer: Option<TargetCustomer>,
    pub monthly_revenue: Option<f64>,
    pub active_users: Option<u64>,
    /// Month-over-month growth, in percent.
    pub monthly_growth_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalSituation {
    pub team_size: Option<TeamSize>,
    pub experience: Option<ExperienceLevel>,
    pub commitment: Option<CommitmentLevel>,
    pub runway_months: Option<f64>,
    pub financial_cushion: Option<FinancialCushion>,
    /// 1 (risk averse) ..= 10 (risk seeking).
    pub risk_tolerance: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub exit_goal: Option<ExitGoal>,
    pub growth_speed: Option<GrowthSpeed>,
    /// 1 (happy to share control) ..= 10 (control is essential).
    pub control_importance: Option<u8>,
    pub time_horizon_years: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub market_timing: Option<MarketTiming>,
    pub market_type: Option<MarketType>,
    #[serde(default)]
    pub competitors: Vec<String>,
    pub tam: Option<f64>,
    pub sam: Option<f64>,
    pub som: Option<f64>,
}

/// Everything the founder told us. Every field is optional; the engine treats
/// absence as a signal rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FounderInput {
    #[serde(default)]
    pub tier: DataSharingTier,
    #[serde(default)]
    pub project: ProjectBasics,
    #[serde(default)]
    pub personal: PersonalSituation,
    #[serde(default)]
    pub goals: Goals,
    #[serde(default)]
    pub market: MarketAnalysis,
}

impl FounderInput {
    /// Risk tolerance clamped into 1..=10.
    pub fn risk_tolerance(&self) -> Option<u8> {
        self.personal.risk_tolerance.map(|v| v.clamp(1, 10))
    }

    /// Control importance clamped into 1..=10.
    pub fn control_importance(&self) -> Option<u8> {
        self.goals.control_importance.map(|v| v.clamp(1, 10))
    }

    /// Runway in months, ignoring non-finite or negative values.
    pub fn runway_months(&self) -> Option<f64> {
        self.personal
            .runway_months
            .filter(|m| m.is_finite() && *m >= 0.0)
    }

    pub fn commitment_multiplier(&self) -> f64 {
        self.personal
            .commitment
            .map(CommitmentLevel::duration_multiplier)
            .unwrap_or(1.0)
    }

    pub fn is_full_time(&self) -> bool {
        matches!(
            self.personal.commitment,
            None | Some(CommitmentLevel::FullTime)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tier_tables_match_product_constants() {
        let ranges: Vec<_> = DataSharingTier::ALL
            .iter()
            .map(|t| t.confidence_range())
            .collect();
        assert_eq!(ranges, vec![(30, 50), (50, 70), (70, 85), (85, 95)]);

        let multipliers: Vec<_> = DataSharingTier::ALL
            .iter()
            .map(|t| t.confidence_multiplier())
            .collect();
        assert_eq!(multipliers, vec![0.6, 0.75, 0.9, 1.0]);
    }

    #[test]
    fn tiers_are_ordered_by_disclosure() {
        assert!(DataSharingTier::Minimal < DataSharingTier::Basic);
        assert!(DataSharingTier::Detailed < DataSharingTier::Full);
    }

    #[test]
    fn empty_json_object_is_a_valid_input() {
        let input: FounderInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(input, FounderInput::default());
        assert_eq!(input.tier, DataSharingTier::Minimal);
        assert!(input.market.competitors.is_empty());
    }

    #[test]
    fn deserializes_snake_case_enums() {
        let input: FounderInput = serde_json::from_value(json!({
            "tier": "detailed",
            "project": {"category": "consumer_app", "stage": "early_revenue"},
            "personal": {"team_size": "two_founders", "commitment": "side_project"},
            "goals": {"exit_goal": "ipo"},
            "market": {"market_type": "winner_takes_all", "competitors": ["a", "b"]}
        }))
        .unwrap();

        assert_eq!(input.tier, DataSharingTier::Detailed);
        assert_eq!(input.project.category, Some(ProjectCategory::ConsumerApp));
        assert_eq!(input.project.stage, Some(DevelopmentStage::EarlyRevenue));
        assert_eq!(input.personal.team_size, Some(TeamSize::TwoFounders));
        assert_eq!(input.goals.exit_goal, Some(ExitGoal::Ipo));
        assert_eq!(input.market.competitors.len(), 2);
        assert_eq!(input.commitment_multiplier(), 2.0);
        assert!(!input.is_full_time());
    }

    #[test]
    fn scales_are_clamped_not_rejected() {
        let mut input = FounderInput::default();
        input.personal.risk_tolerance = Some(42);
        input.goals.control_importance = Some(0);
        input.personal.runway_months = Some(-3.0);
        assert_eq!(input.risk_tolerance(), Some(10));
        assert_eq!(input.control_importance(), Some(1));
        assert_eq!(input.runway_months(), None);
    }
}
