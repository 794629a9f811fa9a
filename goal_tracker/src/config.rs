//! Tracker configuration.

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::goal_graph::PrerequisitePolicy;
use crate::realized::MAX_GOALS;

/// Configuration for a graphed goal tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Number of minor goal slots.
    pub max_minor_goals: usize,

    /// When a goal with several predecessors unlocks.
    pub prerequisite_policy: PrerequisitePolicy,

    /// Mark the first visible goal in updates.
    pub highlight_first_incomplete: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_minor_goals: MAX_GOALS,
            prerequisite_policy: PrerequisitePolicy::AllRequired,
            highlight_first_incomplete: false,
        }
    }
}

impl TrackerConfig {
    /// Parse from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, TrackerError> {
        Ok(toml::from_str(source)?)
    }
}
