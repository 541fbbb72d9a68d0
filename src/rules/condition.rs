//! Condition matching: does a rule apply to this design?

use crate::core::types::{Context, Value};
use crate::rules::schema::{Dimension, Operator, RuleCondition};

/// Resolve a dimension to the first of its context keys that is present
pub fn resolve_dimension<'a>(dimension: Dimension, context: &'a Context) -> Option<&'a Value> {
    dimension
        .context_keys()
        .iter()
        .find_map(|key| context.get(key))
}

/// Evaluate one condition against the context
///
/// A dimension missing from the context equals nothing, so only
/// `not_equals` can match it. Unknown operators never match.
pub fn evaluate_condition(condition: &RuleCondition, context: &Context) -> bool {
    let actual = resolve_dimension(condition.dimension, context);
    let expected = &condition.value;

    match condition.operator {
        Operator::Equals => actual == Some(expected),
        Operator::NotEquals => actual != Some(expected),
        Operator::Contains => actual.is_some_and(|actual| contains(actual, expected)),
        Operator::GreaterThan => compare_numbers(actual, expected, |a, b| a > b),
        Operator::LessThan => compare_numbers(actual, expected, |a, b| a < b),
        Operator::In => match (expected.as_list(), actual) {
            (Some(allowed), Some(value)) => allowed.contains(value),
            _ => false,
        },
        Operator::Unknown => false,
    }
}

/// List membership, or substring match on text
fn contains(actual: &Value, expected: &Value) -> bool {
    if let Some(items) = actual.as_list() {
        return items.contains(expected);
    }
    match (actual.as_str(), expected.to_text()) {
        (Some(haystack), Some(needle)) => haystack.contains(needle.as_str()),
        _ => false,
    }
}

fn compare_numbers(actual: Option<&Value>, expected: &Value, cmp: fn(f64, f64) -> bool) -> bool {
    match (actual.and_then(Value::as_number), expected.as_number()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}
