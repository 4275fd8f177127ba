//! Weighted multi-factor funding route model.
//!
//! Eight factors each map the founder input to a bootstrap and an investor
//! sub-score in 0..=100. Weighted sums are normalized by the total weight, so
//! the table does not need to sum to exactly 100.

use crate::domain::input::{
    CommitmentLevel, DevelopmentStage, ExitGoal, ExperienceLevel, FinancialCushion, FounderInput,
    GrowthSpeed, MarketType, TeamSize,
};
use crate::domain::route::{
    FundingRoute, ReasonImpact, RouteReason, RouteResult, RouteScores,
};
use crate::engine::plan::generate_action_plan;
use crate::engine::rules::{self, Rule, RoutedRule};
use crate::engine::stats::clamp_score;

/// Score gap under which neither pure route is clearly better.
pub const HYBRID_THRESHOLD: f64 = 15.0;
pub const MAX_REASONS: usize = 6;
const BASE_CONFIDENCE: f64 = 60.0;
const MIN_CONFIDENCE: f64 = 20.0;
const MAX_CONFIDENCE: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScore {
    pub bootstrap: f64,
    pub investor: f64,
    pub rationale: &'static str,
}

const fn score(bootstrap: f64, investor: f64, rationale: &'static str) -> FactorScore {
    FactorScore {
        bootstrap,
        investor,
        rationale,
    }
}

pub struct RouteFactor {
    pub name: &'static str,
    pub weight: f64,
    pub evaluate: fn(&FounderInput) -> FactorScore,
}

pub const ROUTE_FACTORS: [RouteFactor; 8] = [
    RouteFactor {
        name: "market_type",
        weight: 15.0,
        evaluate: market_type,
    },
    RouteFactor {
        name: "development_stage",
        weight: 12.0,
        evaluate: development_stage,
    },
    RouteFactor {
        name: "team_situation",
        weight: 14.0,
        evaluate: team_situation,
    },
    RouteFactor {
        name: "financial_runway",
        weight: 16.0,
        evaluate: financial_runway,
    },
    RouteFactor {
        name: "exit_goal",
        weight: 18.0,
        evaluate: exit_goal,
    },
    RouteFactor {
        name: "control_preference",
        weight: 12.0,
        evaluate: control_preference,
    },
    RouteFactor {
        name: "growth_speed",
        weight: 10.0,
        evaluate: growth_speed,
    },
    RouteFactor {
        name: "risk_tolerance",
        weight: 8.0,
        evaluate: risk_tolerance,
    },
];

fn market_type(input: &FounderInput) -> FactorScore {
    match input.market.market_type {
        Some(MarketType::WinnerTakesAll) => score(
            25.0,
            90.0,
            "Winner-takes-all markets reward speed, which usually takes outside capital.",
        ),
        Some(MarketType::Fragmented) => score(
            70.0,
            45.0,
            "A fragmented market leaves room to grow steadily from revenue.",
        ),
        Some(MarketType::Niche) => score(
            85.0,
            25.0,
            "Niche markets are often too small for venture returns but ideal for a profitable business.",
        ),
        Some(MarketType::Regulated) => score(
            40.0,
            70.0,
            "Regulated markets carry compliance costs that are easier to absorb with funding.",
        ),
        None => score(50.0, 50.0, "Market structure is unknown, so it does not favour either route."),
    }
}

fn development_stage(input: &FounderInput) -> FactorScore {
    match input.project.stage {
        Some(DevelopmentStage::Idea) => score(
            70.0,
            30.0,
            "Few investors fund bare ideas; validating cheaply comes first.",
        ),
        Some(DevelopmentStage::Prototype) => score(
            65.0,
            40.0,
            "A prototype can be taken to first customers without outside money.",
        ),
        Some(DevelopmentStage::Mvp) => score(
            55.0,
            55.0,
            "An MVP is the point where both routes become realistic.",
        ),
        Some(DevelopmentStage::EarlyRevenue) => score(
            60.0,
            65.0,
            "Early revenue both funds growth and makes the company investable.",
        ),
        Some(DevelopmentStage::Growth) => score(
            45.0,
            80.0,
            "Growth-stage companies can put capital to work quickly.",
        ),
        Some(DevelopmentStage::Scale) => score(
            35.0,
            85.0,
            "Scaling usually needs more capital than revenue alone provides.",
        ),
        None => score(50.0, 50.0, "Development stage is unknown, so it does not favour either route."),
    }
}

fn team_situation(input: &FounderInput) -> FactorScore {
    let base = match input.personal.team_size {
        Some(TeamSize::Solo) => score(
            75.0,
            30.0,
            "Solo founders keep full control, but investors rarely back a one-person team.",
        ),
        Some(TeamSize::TwoFounders) => score(
            60.0,
            60.0,
            "A two-founder team is a workable base for either route.",
        ),
        Some(TeamSize::SmallTeam) => score(
            45.0,
            70.0,
            "A small team raises the monthly burn and looks credible to investors.",
        ),
        Some(TeamSize::LargerTeam) => score(
            35.0,
            80.0,
            "A larger team is expensive to carry on revenue alone.",
        ),
        None => score(50.0, 50.0, "Team composition is unknown, so it does not favour either route."),
    };

    let investor_adjustment = match input.personal.experience {
        Some(ExperienceLevel::SerialFounder) => 15.0,
        Some(ExperienceLevel::FirstTime) => -10.0,
        Some(ExperienceLevel::SomeExperience) | None => 0.0,
    };

    FactorScore {
        investor: clamp_score(base.investor + investor_adjustment),
        ..base
    }
}

fn financial_runway(input: &FounderInput) -> FactorScore {
    let base = match input.runway_months() {
        Some(m) if m < 6.0 => score(
            30.0,
            75.0,
            "Under six months of runway makes outside capital or fast revenue urgent.",
        ),
        Some(m) if m < 12.0 => score(
            55.0,
            60.0,
            "Six to twelve months of runway leaves limited time to reach profitability alone.",
        ),
        Some(m) if m < 24.0 => score(
            75.0,
            45.0,
            "A year or more of runway gives room to grow on your own terms.",
        ),
        Some(_) => score(
            85.0,
            35.0,
            "Two years or more of runway lets you bootstrap without pressure.",
        ),
        None => score(50.0, 50.0, "Runway is unknown, so it does not favour either route."),
    };

    let bootstrap_adjustment = match input.personal.financial_cushion {
        Some(FinancialCushion::High) => 10.0,
        Some(FinancialCushion::Moderate) => 5.0,
        Some(FinancialCushion::Low) => -5.0,
        Some(FinancialCushion::None) => -10.0,
        None => 0.0,
    };

    FactorScore {
        bootstrap: clamp_score(base.bootstrap + bootstrap_adjustment),
        ..base
    }
}

fn exit_goal(input: &FounderInput) -> FactorScore {
    match input.goals.exit_goal {
        Some(ExitGoal::Lifestyle) => score(
            95.0,
            10.0,
            "A lifestyle business does not produce the exit investors need.",
        ),
        Some(ExitGoal::Acquisition) => score(
            55.0,
            70.0,
            "An acquisition exit fits investor timelines but can also be reached bootstrapped.",
        ),
        Some(ExitGoal::Ipo) => score(
            15.0,
            95.0,
            "An IPO requires the scale that institutional capital provides.",
        ),
        Some(ExitGoal::Unsure) | None => score(
            50.0,
            50.0,
            "Without a defined exit goal, neither route is favoured.",
        ),
    }
}

fn control_preference(input: &FounderInput) -> FactorScore {
    match input.control_importance() {
        Some(v) if v >= 8 => score(
            90.0,
            20.0,
            "Keeping control is essential to you; investors take equity and board seats.",
        ),
        Some(v) if v >= 5 => score(
            65.0,
            45.0,
            "You value control but could share some of it for the right partner.",
        ),
        Some(_) => score(
            35.0,
            75.0,
            "You are comfortable sharing control in exchange for capital and support.",
        ),
        None => score(50.0, 50.0, "Control preference is unknown, so it does not favour either route."),
    }
}

fn growth_speed(input: &FounderInput) -> FactorScore {
    match input.goals.growth_speed {
        Some(GrowthSpeed::Steady) => score(
            85.0,
            20.0,
            "Steady growth can be financed from revenue.",
        ),
        Some(GrowthSpeed::Moderate) => score(
            55.0,
            55.0,
            "Moderate growth is achievable on either route.",
        ),
        Some(GrowthSpeed::Aggressive) => score(
            20.0,
            90.0,
            "Aggressive growth usually outpaces what revenue can fund.",
        ),
        None => score(50.0, 50.0, "Growth ambition is unknown, so it does not favour either route."),
    }
}

fn risk_tolerance(input: &FounderInput) -> FactorScore {
    match input.risk_tolerance() {
        Some(v) if v >= 8 => score(
            30.0,
            85.0,
            "A high risk tolerance suits the all-or-nothing dynamics of venture funding.",
        ),
        Some(v) if v >= 5 => score(
            55.0,
            55.0,
            "A moderate risk tolerance works with either route.",
        ),
        Some(_) => score(
            80.0,
            25.0,
            "A low risk tolerance favours the slower, self-funded path.",
        ),
        None => score(50.0, 50.0, "Risk tolerance is unknown, so it does not favour either route."),
    }
}

pub const WARNING_RULES: &[Rule<FounderInput>] = &[
    Rule {
        id: "short_runway",
        applies: |i| i.runway_months().is_some_and(|m| m < 6.0),
        message: "Runway is under six months: secure revenue or funding before anything else.",
    },
    Rule {
        id: "solo_ipo",
        applies: |i| {
            i.personal.team_size == Some(TeamSize::Solo) && i.goals.exit_goal == Some(ExitGoal::Ipo)
        },
        message: "An IPO path with a solo team is unusual; investors will expect you to build a founding team quickly.",
    },
    Rule {
        id: "ipo_with_control",
        applies: |i| {
            i.goals.exit_goal == Some(ExitGoal::Ipo) && i.control_importance().is_some_and(|v| v >= 8)
        },
        message: "An IPO requires outside capital, which conflicts with keeping tight control.",
    },
    Rule {
        id: "lifestyle_aggressive",
        applies: |i| {
            i.goals.exit_goal == Some(ExitGoal::Lifestyle)
                && i.goals.growth_speed == Some(GrowthSpeed::Aggressive)
        },
        message: "A lifestyle business rarely sustains aggressive growth targets; revisit one of the two.",
    },
    Rule {
        id: "low_risk_aggressive",
        applies: |i| {
            i.goals.growth_speed == Some(GrowthSpeed::Aggressive)
                && i.risk_tolerance().is_some_and(|v| v <= 3)
        },
        message: "Aggressive growth carries more risk than you said you are comfortable with.",
    },
    Rule {
        id: "side_project_ambition",
        applies: |i| {
            i.personal.commitment == Some(CommitmentLevel::SideProject)
                && (i.goals.growth_speed == Some(GrowthSpeed::Aggressive)
                    || i.goals.exit_goal == Some(ExitGoal::Ipo))
        },
        message: "A side-project commitment makes ambitious growth or exit goals hard to execute.",
    },
    Rule {
        id: "no_cushion",
        applies: |i| i.personal.financial_cushion == Some(FinancialCushion::None),
        message: "You have no financial cushion; plan personal expenses before committing savings to the company.",
    },
    Rule {
        id: "capital_intensive_low_cushion",
        applies: |i| {
            i.project.category.is_some_and(|c| c.is_capital_intensive())
                && matches!(
                    i.personal.financial_cushion,
                    Some(FinancialCushion::None | FinancialCushion::Low)
                )
        },
        message: "Capital-intensive products are hard to fund from a small personal cushion.",
    },
];

pub const ALTERNATIVE_RULES: &[RoutedRule] = &[
    RoutedRule {
        id: "angel_round_for_speed",
        route: Some(FundingRoute::Bootstrap),
        applies: |i| i.market.market_type == Some(MarketType::WinnerTakesAll),
        message: "Consider a small angel round to keep pace in a winner-takes-all market.",
    },
    RoutedRule {
        id: "non_dilutive_for_control",
        route: Some(FundingRoute::Investor),
        applies: |i| i.control_importance().is_some_and(|v| v >= 7),
        message: "Revenue-based financing or non-dilutive grants can fund growth while preserving control.",
    },
    RoutedRule {
        id: "revenue_then_seed",
        route: Some(FundingRoute::Hybrid),
        applies: |_| true,
        message: "Start with customer revenue and revisit a seed round once traction milestones are met.",
    },
    RoutedRule {
        id: "accelerators_early",
        route: None,
        applies: |i| {
            matches!(
                i.project.stage,
                Some(DevelopmentStage::Idea | DevelopmentStage::Prototype)
            )
        },
        message: "Accelerators and grant programmes can fund validation before you commit to a route.",
    },
    RoutedRule {
        id: "pre_seed_not_vc",
        route: Some(FundingRoute::Investor),
        applies: |i| i.project.stage == Some(DevelopmentStage::Idea),
        message: "Pre-seed angels are more realistic than institutional VC at the idea stage.",
    },
    RoutedRule {
        id: "strategic_partners",
        route: Some(FundingRoute::Bootstrap),
        applies: |i| i.project.category.is_some_and(|c| c.is_capital_intensive()),
        message: "Capital-intensive products often need grants or strategic partners even when bootstrapping.",
    },
    RoutedRule {
        id: "bridge_financing",
        route: None,
        applies: |i| i.runway_months().is_some_and(|m| m < 6.0),
        message: "Pre-sales or a friends-and-family bridge can extend a short runway.",
    },
];

/// Scores the founder input and recommends a funding route, with an action
/// plan for the recommended route.
pub fn compute_route(input: &FounderInput) -> RouteResult {
    let mut weighted_bootstrap = 0.0;
    let mut weighted_investor = 0.0;
    let mut total_weight = 0.0;
    let mut reasons = Vec::with_capacity(ROUTE_FACTORS.len());

    for factor in &ROUTE_FACTORS {
        let s = (factor.evaluate)(input);
        let bootstrap = clamp_score(s.bootstrap);
        let investor = clamp_score(s.investor);

        weighted_bootstrap += (bootstrap / 100.0) * factor.weight;
        weighted_investor += (investor / 100.0) * factor.weight;
        total_weight += factor.weight;

        let impact = if bootstrap > investor {
            ReasonImpact::Positive
        } else if bootstrap < investor {
            ReasonImpact::Negative
        } else {
            ReasonImpact::Neutral
        };

        reasons.push(RouteReason {
            factor: factor.name.to_string(),
            weight: factor.weight,
            impact,
            bootstrap_score: bootstrap,
            investor_score: investor,
            message: s.rationale.to_string(),
        });
    }

    let bootstrap = (weighted_bootstrap / total_weight * 100.0).round();
    let investor = (weighted_investor / total_weight * 100.0).round();
    let hybrid = ((bootstrap + investor) / 2.0).round();
    let spread = (bootstrap - investor).abs();

    let recommendation = if spread < HYBRID_THRESHOLD {
        FundingRoute::Hybrid
    } else if bootstrap > investor {
        FundingRoute::Bootstrap
    } else {
        FundingRoute::Investor
    };

    let multiplier = input.tier.confidence_multiplier();
    let confidence = ((BASE_CONFIDENCE + spread / 2.0) * multiplier)
        .round()
        .clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u32;

    // Stable sort: ties keep factor table order.
    reasons.sort_by(|a, b| {
        b.spread()
            .partial_cmp(&a.spread())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    reasons.truncate(MAX_REASONS);

    let warnings = rules::evaluate(WARNING_RULES, input);
    let alternatives = rules::evaluate_routed(ALTERNATIVE_RULES, input, recommendation);
    let action_plan = generate_action_plan(input, recommendation);

    tracing::debug!(
        %recommendation,
        bootstrap,
        investor,
        confidence,
        warnings = warnings.len(),
        "route computed"
    );

    RouteResult {
        recommendation,
        scores: RouteScores {
            bootstrap,
            investor,
            hybrid,
        },
        confidence,
        reasons,
        warnings,
        alternatives,
        action_plan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::{DataSharingTier, ProjectCategory};
    use proptest::prelude::*;
    use serde_json::json;

    fn scenario_input() -> FounderInput {
        serde_json::from_value(json!({
            "tier": "basic",
            "project": {"category": "saas", "stage": "mvp"},
            "personal": {"team_size": "solo", "runway_months": 9.0, "risk_tolerance": 5},
            "goals": {"exit_goal": "unsure", "growth_speed": "moderate", "control_importance": 5}
        }))
        .unwrap()
    }

    #[test]
    fn factor_table_covers_eight_dimensions() {
        assert_eq!(ROUTE_FACTORS.len(), 8);
        let total: f64 = ROUTE_FACTORS.iter().map(|f| f.weight).sum();
        assert_eq!(total, 105.0);
    }

    #[test]
    fn solo_saas_mvp_scenario_is_hybrid() {
        let result = compute_route(&scenario_input());
        assert_eq!(result.scores.bootstrap, 57.0);
        assert_eq!(result.scores.investor, 50.0);
        assert_eq!(result.scores.hybrid, 54.0);
        assert_eq!(result.recommendation, FundingRoute::Hybrid);
        assert_eq!(result.confidence, 48);
        assert_eq!(result.reasons.len(), MAX_REASONS);
        assert_eq!(result.reasons[0].factor, "team_situation");
        assert_eq!(result.reasons[0].impact, ReasonImpact::Positive);
        assert_eq!(result.action_plan.route, FundingRoute::Hybrid);
    }

    #[test]
    fn recomputing_gives_identical_result() {
        let input = scenario_input();
        assert_eq!(compute_route(&input), compute_route(&input));
    }

    #[test]
    fn empty_input_is_hybrid_at_minimal_confidence() {
        let result = compute_route(&FounderInput::default());
        assert_eq!(result.scores.bootstrap, 50.0);
        assert_eq!(result.scores.investor, 50.0);
        assert_eq!(result.recommendation, FundingRoute::Hybrid);
        assert_eq!(result.confidence, 36);
        assert!(result.warnings.is_empty());
        assert!(result
            .reasons
            .iter()
            .all(|r| r.impact == ReasonImpact::Neutral));
    }

    #[test]
    fn venture_profile_recommends_investor() {
        let input: FounderInput = serde_json::from_value(json!({
            "tier": "full",
            "project": {"stage": "growth"},
            "personal": {"team_size": "small_team", "experience": "serial_founder", "runway_months": 4.0, "risk_tolerance": 9},
            "goals": {"exit_goal": "ipo", "growth_speed": "aggressive", "control_importance": 2},
            "market": {"market_type": "winner_takes_all"}
        }))
        .unwrap();
        let result = compute_route(&input);
        assert_eq!(result.recommendation, FundingRoute::Investor);
        assert!(result.scores.investor > result.scores.bootstrap);
        assert_eq!(result.confidence, 88);
        assert_eq!(result.warnings, vec![WARNING_RULES[0].message]);
        assert!(result
            .alternatives
            .iter()
            .any(|a| a == ALTERNATIVE_RULES[6].message));
    }

    #[test]
    fn lifestyle_profile_recommends_bootstrap() {
        let input: FounderInput = serde_json::from_value(json!({
            "tier": "detailed",
            "project": {"category": "hardware", "stage": "prototype"},
            "personal": {"team_size": "solo", "runway_months": 30.0, "financial_cushion": "high", "risk_tolerance": 2},
            "goals": {"exit_goal": "lifestyle", "growth_speed": "steady", "control_importance": 10},
            "market": {"market_type": "niche"}
        }))
        .unwrap();
        let result = compute_route(&input);
        assert_eq!(result.recommendation, FundingRoute::Bootstrap);
        assert!(result
            .alternatives
            .iter()
            .any(|a| a.contains("strategic partners")));
    }

    #[test]
    fn solo_ipo_warns_about_team_expectations() {
        let mut input = FounderInput::default();
        input.personal.team_size = Some(TeamSize::Solo);
        input.goals.exit_goal = Some(ExitGoal::Ipo);
        let result = compute_route(&input);
        assert!(result.warnings.iter().any(|w| w.contains("solo team")));
    }

    #[test]
    fn experience_shifts_team_investor_score() {
        let mut input = FounderInput::default();
        input.personal.team_size = Some(TeamSize::Solo);
        assert_eq!(team_situation(&input).investor, 30.0);
        input.personal.experience = Some(ExperienceLevel::SerialFounder);
        assert_eq!(team_situation(&input).investor, 45.0);
        input.personal.experience = Some(ExperienceLevel::FirstTime);
        assert_eq!(team_situation(&input).investor, 20.0);
    }

    #[test]
    fn cushion_shifts_runway_bootstrap_score() {
        let mut input = FounderInput::default();
        input.personal.runway_months = Some(30.0);
        input.personal.financial_cushion = Some(FinancialCushion::High);
        assert_eq!(financial_runway(&input).bootstrap, 95.0);
        input.personal.runway_months = Some(2.0);
        input.personal.financial_cushion = Some(FinancialCushion::None);
        assert_eq!(financial_runway(&input).bootstrap, 20.0);
    }

    #[test]
    fn each_warning_rule_fires_in_isolation() {
        let mut input = FounderInput::default();
        input.project.category = Some(ProjectCategory::Biotech);
        input.personal.financial_cushion = Some(FinancialCushion::Low);
        let warnings = rules::evaluate(WARNING_RULES, &input);
        assert_eq!(
            warnings,
            vec!["Capital-intensive products are hard to fund from a small personal cushion."]
        );
    }

    fn arb_input() -> impl Strategy<Value = FounderInput> {
        (
            prop::sample::select(DataSharingTier::ALL.to_vec()),
            prop::option::of(prop::sample::select(vec![
                TeamSize::Solo,
                TeamSize::TwoFounders,
                TeamSize::SmallTeam,
                TeamSize::LargerTeam,
            ])),
            prop::option::of(-5.0f64..60.0),
            prop::option::of(prop::sample::select(vec![
                ExitGoal::Lifestyle,
                ExitGoal::Acquisition,
                ExitGoal::Ipo,
                ExitGoal::Unsure,
            ])),
            prop::option::of(prop::sample::select(vec![
                GrowthSpeed::Steady,
                GrowthSpeed::Moderate,
                GrowthSpeed::Aggressive,
            ])),
            prop::option::of(0u8..=12),
            prop::option::of(0u8..=12),
            prop::option::of(prop::sample::select(vec![
                MarketType::WinnerTakesAll,
                MarketType::Fragmented,
                MarketType::Niche,
                MarketType::Regulated,
            ])),
        )
            .prop_map(
                |(tier, team, runway, exit, growth, risk, control, market)| {
                    let mut input = FounderInput {
                        tier,
                        ..FounderInput::default()
                    };
                    input.personal.team_size = team;
                    input.personal.runway_months = runway;
                    input.personal.risk_tolerance = risk;
                    input.goals.exit_goal = exit;
                    input.goals.growth_speed = growth;
                    input.goals.control_importance = control;
                    input.market.market_type = market;
                    input
                },
            )
    }

    proptest! {
        #[test]
        fn scores_and_confidence_stay_in_bounds(input in arb_input()) {
            let result = compute_route(&input);
            for s in [result.scores.bootstrap, result.scores.investor, result.scores.hybrid] {
                prop_assert!((0.0..=100.0).contains(&s));
            }
            prop_assert!((20..=95).contains(&result.confidence));
            prop_assert!(result.reasons.len() <= MAX_REASONS);
        }

        #[test]
        fn hybrid_iff_scores_are_close(input in arb_input()) {
            let result = compute_route(&input);
            let close = (result.scores.bootstrap - result.scores.investor).abs() < HYBRID_THRESHOLD;
            prop_assert_eq!(result.recommendation == FundingRoute::Hybrid, close);
        }

        #[test]
        fn reasons_are_sorted_by_spread(input in arb_input()) {
            let result = compute_route(&input);
            for pair in result.reasons.windows(2) {
                prop_assert!(pair[0].spread() >= pair[1].spread());
            }
        }
    }
}
