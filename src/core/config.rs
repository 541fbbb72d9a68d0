//! Engine configuration with documented constants
//!
//! All magic numbers used by the rule engine and the placement validator
//! are collected here with explanations of their purpose.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::{DesignError, Result};

/// Configuration shared by the rule engine and the placement validator
///
/// Every field has a default, so a TOML file only needs to list the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === RULE SEVERITY ===
    /// Minimum priority for a failing rule to be reported as an error
    ///
    /// Any error makes the design invalid.
    pub error_priority: u8,

    /// Minimum priority for a failing rule to be reported as a warning
    ///
    /// Failing rules below this priority become suggestions, which the
    /// issue panel lets users dismiss.
    pub warning_priority: u8,

    // === PLACEMENT GRID ===
    /// Grid unit that dropped and nudged positions snap to (room units)
    pub grid_size: f64,

    /// Increment that rotate gestures snap to (degrees)
    ///
    /// At 15, a full turn has 24 stops.
    pub rotation_step: f64,

    // === MOUNT ZONING ===
    /// Maximum distance from a wall for a wall-mounted item (room units)
    pub wall_threshold: f64,

    /// Maximum distance from a corner, on both axes, for a rack (room units)
    pub corner_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Severity buckets (error > warning > suggestion)
            error_priority: 80,
            warning_priority: 40,

            // Grid
            grid_size: 1.0,
            rotation_step: 15.0,

            // Zoning
            wall_threshold: 2.0,
            corner_threshold: 3.0,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.warning_priority > self.error_priority {
            return Err(DesignError::InvalidConfig(format!(
                "warning_priority ({}) should be <= error_priority ({})",
                self.warning_priority, self.error_priority
            )));
        }

        if self.error_priority > 100 {
            return Err(DesignError::InvalidConfig(format!(
                "error_priority ({}) must be within 0..=100",
                self.error_priority
            )));
        }

        if self.grid_size <= 0.0 || self.rotation_step <= 0.0 {
            return Err(DesignError::InvalidConfig(
                "grid_size and rotation_step must be positive".into(),
            ));
        }

        if self.wall_threshold < 0.0 || self.corner_threshold < 0.0 {
            return Err(DesignError::InvalidConfig(
                "Mount thresholds must not be negative".into(),
            ));
        }

        Ok(())
    }
}
