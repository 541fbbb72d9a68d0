//! Declarative design rules: schema, condition matching, expressions and
//! the engine that classifies failures

pub mod condition;
pub mod engine;
pub mod expression;
pub mod loader;
pub mod schema;

pub use condition::{evaluate_condition, resolve_dimension};
pub use engine::{RuleEngine, RuleEvaluation, Severity, ValidationIssue, ValidationResult};
pub use expression::{evaluate_expression, CompareOp, Comparison, ExpressionError};
pub use loader::RuleSet;
pub use schema::{Dimension, Operator, Rule, RuleCondition};
