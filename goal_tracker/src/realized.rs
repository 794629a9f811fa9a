//! Realized goals - the goal instances currently in play.

use goal_tuning::{GoalId, SimId, SituationGoal};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::goal_graph::RealizedGoals;
use crate::seedling::GoalSeedling;

/// Default number of minor goal slots.
pub const MAX_GOALS: usize = 3;

/// Unique identifier for a realized goal instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalInstanceId(pub Uuid);

impl GoalInstanceId {
    /// Create a new random instance ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GoalInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GoalInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A goal that has been offered and is being worked on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveGoal {
    pub instance_id: GoalInstanceId,
    pub goal_id: GoalId,
    pub actor: Option<SimId>,
    /// Target inherited from the previously completed goal.
    pub inherited_target: Option<SimId>,
    /// Iterations completed so far.
    pub count: u32,
    pub iterations: u32,
    pub visible: bool,
}

impl ActiveGoal {
    /// Realize a tuned goal.
    pub fn new(
        goal: &SituationGoal,
        actor: Option<SimId>,
        inherited_target: Option<SimId>,
    ) -> Self {
        Self {
            instance_id: GoalInstanceId::new(),
            goal_id: goal.id,
            actor,
            inherited_target,
            count: 0,
            iterations: goal.iterations,
            visible: goal.visible,
        }
    }

    /// Recreate a saved goal. The instance gets a fresh id.
    pub fn from_seedling(seedling: &GoalSeedling, goal: &SituationGoal) -> Self {
        let mut active = Self::new(goal, seedling.actor_id.into_option(), None);
        active.count = seedling.count.min(active.iterations);
        active
    }

    pub fn to_seedling(&self) -> GoalSeedling {
        GoalSeedling {
            goal_id: self.goal_id,
            actor_id: SimId::from_option(self.actor),
            count: self.count,
        }
    }

    /// Count one passed iteration. Returns true once the goal is complete.
    pub fn advance(&mut self) -> bool {
        self.count = self.count.saturating_add(1).min(self.iterations);
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.count >= self.iterations
    }
}

/// Fixed set of slots for realized goals.
///
/// Slots keep their position when neighbours are removed, so the order
/// goals are shown in stays stable.
#[derive(Debug, Clone)]
pub struct RealizedGoalManager {
    slots: Vec<Option<ActiveGoal>>,
}

impl Default for RealizedGoalManager {
    fn default() -> Self {
        Self::new(MAX_GOALS)
    }
}

impl RealizedGoalManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Put the goal in the first free slot. Returns false when full.
    pub fn add_goal(&mut self, goal: ActiveGoal) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(goal);
                true
            }
            None => false,
        }
    }

    pub fn can_add_new_goal(&self) -> bool {
        self.slots.iter().any(Option::is_none)
    }

    pub fn is_goal_realized(&self, goal_id: GoalId) -> bool {
        self.goals().any(|goal| goal.goal_id == goal_id)
    }

    pub fn get(&self, instance_id: GoalInstanceId) -> Option<&ActiveGoal> {
        self.goals().find(|goal| goal.instance_id == instance_id)
    }

    pub fn get_mut(&mut self, instance_id: GoalInstanceId) -> Option<&mut ActiveGoal> {
        self.slots
            .iter_mut()
            .flatten()
            .find(|goal| goal.instance_id == instance_id)
    }

    /// Free the slot holding this instance.
    pub fn remove_goal(&mut self, instance_id: GoalInstanceId) -> Option<ActiveGoal> {
        self.slots
            .iter_mut()
            .find(|slot| matches!(slot, Some(goal) if goal.instance_id == instance_id))
            .and_then(Option::take)
    }

    /// Occupied slots in slot order.
    pub fn goals(&self) -> impl Iterator<Item = &ActiveGoal> {
        self.slots.iter().flatten()
    }
}

impl RealizedGoals for RealizedGoalManager {
    fn is_realized(&self, goal_id: GoalId) -> bool {
        self.is_goal_realized(goal_id)
    }

    fn is_empty(&self) -> bool {
        RealizedGoalManager::is_empty(self)
    }
}
