//! Save data for graphed goal trackers.
//!
//! The field names match the save envelope the tracker has always written
//! (`completed_goals_ids`, `unlocked_goals_ids`), so older saves keep loading.

use goal_tuning::{GoalId, SimId};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Progress of a goal graph: the two ordered id lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphedGoalSeedling {
    #[serde(default)]
    pub completed_goals_ids: Vec<GoalId>,
    #[serde(default)]
    pub unlocked_goals_ids: Vec<GoalId>,
}

/// Which goal tracker wrote a seedling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalTrackerType {
    StandardGoalTracker,
    DynamicGoalTracker,
    StandardGraphedGoalTracker,
}

/// A realized goal as saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSeedling {
    pub goal_id: GoalId,
    /// `0` when the goal had no actor.
    #[serde(default = "SimId::none")]
    pub actor_id: SimId,
    #[serde(default)]
    pub count: u32,
}

/// Everything a graphed goal tracker saves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTrackerSeedling {
    pub tracker_type: GoalTrackerType,
    #[serde(default)]
    pub has_offered_goals: bool,
    /// `0` when no target was inherited.
    #[serde(default = "SimId::none")]
    pub inherited_target_id: SimId,
    #[serde(default)]
    pub minor_goals: Vec<GoalSeedling>,
    #[serde(default)]
    pub graphed_goal_seedling: GraphedGoalSeedling,
}

impl GoalTrackerSeedling {
    /// An empty seedling for a graphed tracker.
    pub fn graphed(has_offered_goals: bool, inherited_target_id: SimId) -> Self {
        Self {
            tracker_type: GoalTrackerType::StandardGraphedGoalTracker,
            has_offered_goals,
            inherited_target_id,
            minor_goals: Vec::new(),
            graphed_goal_seedling: GraphedGoalSeedling::default(),
        }
    }

    pub fn add_minor_goal(&mut self, seedling: GoalSeedling) {
        self.minor_goals.push(seedling);
    }

    pub fn to_json(&self) -> Result<String, TrackerError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        Ok(serde_json::from_str(json)?)
    }
}
