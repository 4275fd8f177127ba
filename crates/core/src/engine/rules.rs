use crate::domain::input::FounderInput;
use crate::domain::route::FundingRoute;

/// One row of an ordered (predicate, message) table.
pub struct Rule<C: ?Sized> {
    pub id: &'static str,
    pub applies: fn(&C) -> bool,
    pub message: &'static str,
}

/// A rule over founder input that can be limited to one funding route.
///
/// `route: None` applies regardless of the route.
pub struct RoutedRule {
    pub id: &'static str,
    pub route: Option<FundingRoute>,
    pub applies: fn(&FounderInput) -> bool,
    pub message: &'static str,
}

/// Messages of every matching rule, in table order.
pub fn evaluate<C: ?Sized>(rules: &[Rule<C>], ctx: &C) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| (rule.applies)(ctx))
        .map(|rule| rule.message.to_string())
        .collect()
}

pub fn evaluate_routed(rules: &[RoutedRule], input: &FounderInput, route: FundingRoute) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| rule.route.map_or(true, |r| r == route))
        .filter(|rule| (rule.applies)(input))
        .map(|rule| rule.message.to_string())
        .collect()
}
