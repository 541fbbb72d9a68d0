//! Rule schema types for TOML/JSON deserialization.
//!
//! Rules are authored by integrators and stored externally; this module only
//! defines their shape. Field names are camelCase on the wire to match the
//! records the rule repository hands over.

use serde::{Deserialize, Serialize};

use crate::core::types::Value;

/// A named axis a rule condition can test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    RoomType,
    Platform,
    Tier,
    RoomSize,
    Capacity,
    UseCase,
}

impl Dimension {
    /// Context keys this dimension reads, most preferred first
    ///
    /// Older sessions were saved with the legacy keys, so each dimension
    /// falls back through its aliases.
    pub fn context_keys(&self) -> &'static [&'static str] {
        match self {
            Dimension::RoomType => &["roomType", "room_type"],
            Dimension::Platform => &["platform", "videoPlatform"],
            Dimension::Tier => &["tier", "qualityTier"],
            Dimension::RoomSize => &["roomSize", "room_size", "size"],
            Dimension::Capacity => &["capacity", "occupancy"],
            Dimension::UseCase => &["useCase", "use_case"],
        }
    }
}

/// Comparison applied by a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    In,
    /// Anything the engine does not recognise; never matches
    #[serde(other)]
    Unknown,
}

/// One applicability guard on a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub dimension: Dimension,
    pub operator: Operator,
    pub value: Value,
}

impl RuleCondition {
    pub fn new(dimension: Dimension, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            dimension,
            operator,
            value: value.into(),
        }
    }
}

/// One testable business or engineering constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Category tag (placement, quantities, ...)
    #[serde(default)]
    pub aspect: String,
    #[serde(default)]
    pub conditions: Vec<RuleCondition>,
    /// Comparison in the `path op literal` DSL; empty means always passes
    #[serde(default)]
    pub expression: String,
    /// 0-100, higher is more severe
    #[serde(default)]
    pub priority: u8,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Rule {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            aspect: String::new(),
            conditions: Vec::new(),
            expression: String::new(),
            priority: 0,
            is_active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_aspect(mut self, aspect: impl Into<String>) -> Self {
        self.aspect = aspect.into();
        self
    }

    pub fn with_condition(mut self, condition: RuleCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = expression.into();
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
