//! Load rule sets from TOML or JSON files

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::core::error::{DesignError, Result};
use crate::rules::schema::Rule;

/// A list of rules as supplied by the rule repository
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// JSON exports come either wrapped (`{"rules": [...]}`) or as a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleFile {
    Wrapped(RuleSet),
    Bare(Vec<Rule>),
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Parse `[[rules]]` tables
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let set: RuleSet = toml::from_str(content)?;
        set.validate()?;
        Ok(set)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let set = match serde_json::from_str::<RuleFile>(content)? {
            RuleFile::Wrapped(set) => set,
            RuleFile::Bare(rules) => RuleSet::new(rules),
        };
        set.validate()?;
        Ok(set)
    }

    /// Load a rule file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self> {
        let parse: fn(&str) -> Result<Self> = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            other => {
                return Err(DesignError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };
        let set = parse(&fs::read_to_string(path)?)?;
        tracing::info!("Loaded {} rules from {}", set.rules.len(), path.display());
        Ok(set)
    }

    /// Reject rule sets the engine cannot classify consistently
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.priority > 100 {
                return Err(DesignError::InvalidRule {
                    rule_id: rule.id.clone(),
                    reason: format!("priority {} is outside 0..=100", rule.priority),
                });
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(DesignError::InvalidRule {
                    rule_id: rule.id.clone(),
                    reason: "duplicate rule id".into(),
                });
            }
        }
        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Only the active rules
    pub fn active(&self) -> RuleSet {
        RuleSet::new(self.rules.iter().filter(|r| r.is_active).cloned().collect())
    }

    /// Only the rules tagged with the given aspect
    pub fn by_aspect(&self, aspect: &str) -> RuleSet {
        RuleSet::new(
            self.rules
                .iter()
                .filter(|r| r.aspect == aspect)
                .cloned()
                .collect(),
        )
    }
}
