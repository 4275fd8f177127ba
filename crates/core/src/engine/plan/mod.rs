//! Expands a funding route into a phased, budgeted plan scaled to the
//! founder's commitment level.

pub mod templates;

use crate::domain::input::{FounderInput, TeamSize};
use crate::domain::plan::{
    ActionPhase, ActionPlan, ActionTask, BudgetRange, HoursRange, TaskPriority,
};
use crate::domain::route::FundingRoute;
use crate::engine::rules::{self, RoutedRule};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use templates::{PhaseTemplate, BASELINE_MONTHS};

/// Share of nominal weekly hours a part-time founder can give.
pub const PART_TIME_AVAILABILITY: f64 = 0.6;

static DURATION_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)-(\d+)").unwrap());

pub const RISK_RULES: &[RoutedRule] = &[
    RoutedRule {
        id: "solo_burnout",
        route: None,
        applies: |i| i.personal.team_size == Some(TeamSize::Solo),
        message: "Founder burnout from carrying every role alone",
    },
    RoutedRule {
        id: "solo_skill_gaps",
        route: None,
        applies: |i| i.personal.team_size == Some(TeamSize::Solo),
        message: "Skill gaps with no co-founder to cover them",
    },
    RoutedRule {
        id: "runway_exhausted",
        route: None,
        applies: |i| i.runway_months().is_some_and(|m| m < 6.0),
        message: "Running out of cash before the plan completes",
    },
    RoutedRule {
        id: "part_time_pace",
        route: None,
        applies: |i| !i.is_full_time(),
        message: "Part-time execution stretches every milestone",
    },
    RoutedRule {
        id: "investor_dilution",
        route: Some(FundingRoute::Investor),
        applies: |_| true,
        message: "Ownership dilution across funding rounds",
    },
    RoutedRule {
        id: "investor_market_timing",
        route: Some(FundingRoute::Investor),
        applies: |_| true,
        message: "Fundraising depends on market timing and investor sentiment",
    },
    RoutedRule {
        id: "bootstrap_slow_growth",
        route: Some(FundingRoute::Bootstrap),
        applies: |_| true,
        message: "Slower growth lets better-funded competitors catch up",
    },
    RoutedRule {
        id: "hybrid_split_focus",
        route: Some(FundingRoute::Hybrid),
        applies: |_| true,
        message: "Split focus between building revenue and fundraising",
    },
];

pub const SUCCESS_METRIC_RULES: &[RoutedRule] = &[
    RoutedRule {
        id: "critical_path_on_time",
        route: None,
        applies: |_| true,
        message: "All critical-path tasks completed on schedule",
    },
    RoutedRule {
        id: "bootstrap_break_even",
        route: Some(FundingRoute::Bootstrap),
        applies: |_| true,
        message: "Monthly revenue covers operating costs",
    },
    RoutedRule {
        id: "bootstrap_cac_payback",
        route: Some(FundingRoute::Bootstrap),
        applies: |_| true,
        message: "Customer acquisition cost recovered within three months",
    },
    RoutedRule {
        id: "investor_round_closed",
        route: Some(FundingRoute::Investor),
        applies: |_| true,
        message: "Funding round closed within the fundraising phase",
    },
    RoutedRule {
        id: "investor_growth",
        route: Some(FundingRoute::Investor),
        applies: |_| true,
        message: "15% or more month-over-month growth after funding",
    },
    RoutedRule {
        id: "hybrid_revenue_first",
        route: Some(FundingRoute::Hybrid),
        applies: |_| true,
        message: "Recurring revenue in place before raising",
    },
    RoutedRule {
        id: "hybrid_majority_kept",
        route: Some(FundingRoute::Hybrid),
        applies: |_| true,
        message: "Round closed with founders keeping majority ownership",
    },
    RoutedRule {
        id: "solo_first_hire",
        route: None,
        applies: |i| i.personal.team_size == Some(TeamSize::Solo),
        message: "Co-founder or first hire onboarded",
    },
    RoutedRule {
        id: "extend_runway",
        route: None,
        applies: |i| i.runway_months().is_some_and(|m| m < 12.0),
        message: "Runway extended to 12 months or more",
    },
];

pub fn generate_action_plan(input: &FounderInput, route: FundingRoute) -> ActionPlan {
    let multiplier = input.commitment_multiplier();
    let full_time = input.is_full_time();

    let phases: Vec<ActionPhase> = templates::phases_for(route)
        .iter()
        .map(|t| build_phase(t, multiplier, full_time))
        .collect();

    let total_budget = phases.iter().fold(BudgetRange::default(), |acc, p| BudgetRange {
        min: acc.min + p.budget.min,
        max: acc.max + p.budget.max,
    });

    let critical_path = phases
        .iter()
        .flat_map(|p| &p.tasks)
        .filter(|t| t.priority == TaskPriority::Critical)
        .map(|t| t.title.clone())
        .collect();

    ActionPlan {
        route,
        total_budget,
        total_duration_months: (BASELINE_MONTHS * multiplier).round() as u32,
        critical_path,
        risk_factors: rules::evaluate_routed(RISK_RULES, input, route),
        success_metrics: rules::evaluate_routed(SUCCESS_METRIC_RULES, input, route),
        phases,
    }
}

fn build_phase(template: &PhaseTemplate, multiplier: f64, full_time: bool) -> ActionPhase {
    let (min_hours, max_hours) = template.hours_per_week;
    let time_per_week = if full_time {
        HoursRange {
            min: min_hours,
            max: max_hours,
        }
    } else {
        HoursRange {
            min: (min_hours as f64 * PART_TIME_AVAILABILITY).round() as u32,
            max: (max_hours as f64 * PART_TIME_AVAILABILITY).round() as u32,
        }
    };

    ActionPhase {
        title: template.title.to_string(),
        duration: scale_duration(template.duration, multiplier),
        tasks: template
            .tasks
            .iter()
            .map(|t| ActionTask {
                title: t.title.to_string(),
                description: t.description.to_string(),
                priority: t.priority,
            })
            .collect(),
        budget: BudgetRange {
            min: template.budget.0,
            max: template.budget.1,
        },
        time_per_week,
        milestones: template.milestones.iter().map(|m| m.to_string()).collect(),
        resources: template.resources.iter().map(|r| r.to_string()).collect(),
    }
}

/// Scales every `N-M` range in a duration text, e.g. "4-6 weeks" x1.5 -> "6-9 weeks".
pub fn scale_duration(text: &str, multiplier: f64) -> String {
    DURATION_RANGE_RE
        .replace_all(text, |caps: &Captures| {
            let scale = |s: &str| {
                s.parse::<f64>()
                    .map(|n| (n * multiplier).round().to_string())
                    .unwrap_or_else(|_| s.to_string())
            };
            format!("{}-{}", scale(&caps[1]), scale(&caps[2]))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::CommitmentLevel;

    fn input_with(commitment: Option<CommitmentLevel>) -> FounderInput {
        let mut input = FounderInput::default();
        input.personal.commitment = commitment;
        input
    }

    #[test]
    fn scales_duration_ranges() {
        assert_eq!(scale_duration("4-6 weeks", 1.0), "4-6 weeks");
        assert_eq!(scale_duration("4-6 weeks", 1.5), "6-9 weeks");
        assert_eq!(scale_duration("3-4 weeks", 1.5), "5-6 weeks");
        assert_eq!(scale_duration("8-12 weeks", 2.0), "16-24 weeks");
        assert_eq!(scale_duration("ongoing", 2.0), "ongoing");
    }

    #[test]
    fn total_budget_is_sum_of_phases() {
        for route in [FundingRoute::Bootstrap, FundingRoute::Investor, FundingRoute::Hybrid] {
            let plan = generate_action_plan(&FounderInput::default(), route);
            let min: f64 = plan.phases.iter().map(|p| p.budget.min).sum();
            let max: f64 = plan.phases.iter().map(|p| p.budget.max).sum();
            assert_eq!(plan.total_budget.min, min);
            assert_eq!(plan.total_budget.max, max);
        }
    }

    #[test]
    fn bootstrap_totals() {
        let plan = generate_action_plan(&FounderInput::default(), FundingRoute::Bootstrap);
        assert_eq!(plan.total_budget.min, 3_500.0);
        assert_eq!(plan.total_budget.max, 19_000.0);
        assert_eq!(plan.total_duration_months, 6);
        assert_eq!(
            plan.critical_path,
            vec![
                "Interview 20 target customers",
                "Scope the smallest sellable product",
                "Build the core feature set",
                "Launch to the waitlist",
                "Reach break-even",
            ]
        );
    }

    #[test]
    fn commitment_stretches_duration_and_reduces_weekly_hours() {
        let full = generate_action_plan(
            &input_with(Some(CommitmentLevel::FullTime)),
            FundingRoute::Hybrid,
        );
        let part = generate_action_plan(
            &input_with(Some(CommitmentLevel::PartTime)),
            FundingRoute::Hybrid,
        );
        let side = generate_action_plan(
            &input_with(Some(CommitmentLevel::SideProject)),
            FundingRoute::Hybrid,
        );

        assert_eq!(full.total_duration_months, 6);
        assert_eq!(part.total_duration_months, 9);
        assert_eq!(side.total_duration_months, 12);

        assert_eq!(full.phases[0].duration, "4-6 weeks");
        assert_eq!(part.phases[0].duration, "6-9 weeks");
        assert_eq!(side.phases[0].duration, "8-12 weeks");

        assert_eq!(full.phases[0].time_per_week, HoursRange { min: 30, max: 40 });
        assert_eq!(part.phases[0].time_per_week, HoursRange { min: 18, max: 24 });
        assert_eq!(side.phases[0].time_per_week, HoursRange { min: 18, max: 24 });
        assert_eq!(full.total_budget, part.total_budget);
    }

    #[test]
    fn risks_follow_team_runway_and_route() {
        let mut input = input_with(Some(CommitmentLevel::PartTime));
        input.personal.team_size = Some(TeamSize::Solo);
        input.personal.runway_months = Some(3.0);

        let plan = generate_action_plan(&input, FundingRoute::Investor);
        assert_eq!(
            plan.risk_factors,
            vec![
                "Founder burnout from carrying every role alone",
                "Skill gaps with no co-founder to cover them",
                "Running out of cash before the plan completes",
                "Part-time execution stretches every milestone",
                "Ownership dilution across funding rounds",
                "Fundraising depends on market timing and investor sentiment",
            ]
        );
        assert!(plan
            .success_metrics
            .iter()
            .any(|m| m == "Co-founder or first hire onboarded"));
        assert!(plan
            .success_metrics
            .iter()
            .any(|m| m == "Runway extended to 12 months or more"));
    }

    #[test]
    fn default_input_gets_route_risks_only() {
        let plan = generate_action_plan(&FounderInput::default(), FundingRoute::Bootstrap);
        assert_eq!(
            plan.risk_factors,
            vec!["Slower growth lets better-funded competitors catch up"]
        );
        assert_eq!(plan.success_metrics.len(), 3);
    }

    #[test]
    fn generation_is_deterministic() {
        let input = input_with(Some(CommitmentLevel::SideProject));
        assert_eq!(
            generate_action_plan(&input, FundingRoute::Investor),
            generate_action_plan(&input, FundingRoute::Investor)
        );
    }
}
