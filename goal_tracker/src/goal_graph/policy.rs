//! Prerequisite policies for goals with more than one predecessor.

use goal_tuning::GoalId;
use serde::{Deserialize, Serialize};

/// Decides when a chained goal with several predecessors may unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrerequisitePolicy {
    /// Every predecessor must be completed.
    #[default]
    AllRequired,
    /// Completing any one predecessor is enough, so a goal joined from two
    /// chains unlocks after the first completed predecessor.
    AnyRequired,
}

impl PrerequisitePolicy {
    /// Whether `requires` is satisfied by the completed goals.
    ///
    /// A goal with no recorded predecessors is always satisfied.
    pub fn is_satisfied(&self, requires: &[GoalId], completed: &[GoalId]) -> bool {
        if requires.is_empty() {
            return true;
        }
        match self {
            PrerequisitePolicy::AllRequired => requires.iter().all(|id| completed.contains(id)),
            PrerequisitePolicy::AnyRequired => requires.iter().any(|id| completed.contains(id)),
        }
    }
}
