//! Rule evaluation engine: applicability, pass/fail and severity buckets

use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::types::Context;
use crate::rules::condition::evaluate_condition;
use crate::rules::expression::evaluate_expression;
use crate::rules::schema::Rule;

/// Classification of a failed rule, derived from its priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Suggestion,
}

/// One failed rule instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub rule_id: String,
    pub rule_name: String,
    pub message: String,
    pub severity: Severity,
}

/// Aggregate outcome of evaluating a rule list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub suggestions: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// File an issue into the bucket matching its severity
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => {
                self.is_valid = false;
                self.errors.push(issue);
            }
            Severity::Warning => self.warnings.push(issue),
            Severity::Suggestion => self.suggestions.push(issue),
        }
    }

    /// All issues, errors first
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.suggestions.iter())
    }

    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.suggestions.len()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of evaluating one rule
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEvaluation {
    pub applies: bool,
    pub passed: bool,
    pub message: Option<String>,
}

impl RuleEvaluation {
    fn not_applicable() -> Self {
        Self {
            applies: false,
            passed: true,
            message: None,
        }
    }
}

/// Stateless rule evaluator; holds only the severity thresholds
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: EngineConfig,
}

impl RuleEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Map a rule priority onto a severity bucket
    pub fn severity_for(&self, priority: u8) -> Severity {
        if priority >= self.config.error_priority {
            Severity::Error
        } else if priority >= self.config.warning_priority {
            Severity::Warning
        } else {
            Severity::Suggestion
        }
    }

    /// Decide whether a rule applies to the context and, if so, whether it holds
    pub fn evaluate_rule(&self, rule: &Rule, context: &Context) -> RuleEvaluation {
        if !rule.is_active {
            return RuleEvaluation::not_applicable();
        }

        let applies = rule
            .conditions
            .iter()
            .all(|condition| evaluate_condition(condition, context));
        if !applies {
            return RuleEvaluation::not_applicable();
        }

        let passed = evaluate_expression(&rule.expression, context);
        let message = (!passed)
            .then(|| format!("Rule \"{}\" failed: {}", rule.name, rule.description));

        RuleEvaluation {
            applies: true,
            passed,
            message,
        }
    }

    /// Evaluate every rule and classify the failures
    ///
    /// Rules run in descending priority order; equal priorities keep their
    /// input order, so each bucket is ordered the same way.
    pub fn validate_design(&self, rules: &[Rule], context: &Context) -> ValidationResult {
        let mut ordered: Vec<&Rule> = rules.iter().collect();
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority));

        let mut result = ValidationResult::new();
        for rule in ordered {
            let evaluation = self.evaluate_rule(rule, context);
            if !evaluation.applies || evaluation.passed {
                continue;
            }

            let severity = self.severity_for(rule.priority);
            tracing::debug!(
                rule_id = %rule.id,
                priority = rule.priority,
                ?severity,
                "Rule failed"
            );

            result.push(ValidationIssue {
                rule_id: rule.id.clone(),
                rule_name: rule.name.clone(),
                message: evaluation.message.unwrap_or_default(),
                severity,
            });
        }

        result
    }
}
