//! The situation side of a tracker: what the tracker asks of, and reports to,
//! the situation that owns it.

use goal_tuning::{GoalId, SimId, SituationGoal};

use crate::realized::{ActiveGoal, GoalInstanceId};

/// Collaborator supplied by the owning situation.
pub trait SituationHost {
    /// Sim the situation's goals are given to.
    fn goal_actor(&self) -> Option<SimId>;

    /// Whether `goal` may be handed out right now.
    fn can_give_goal(
        &self,
        _goal: &SituationGoal,
        _actor: Option<SimId>,
        _inherited_target: Option<SimId>,
    ) -> bool {
        true
    }

    /// A realized goal was completed and has left its slot.
    fn on_goal_completed(&mut self, goal: &ActiveGoal);

    /// Current goal state for presentation.
    fn send_goal_update(&mut self, update: GoalUpdate);
}

/// What happened to a realized goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    /// One iteration passed. Completes the goal on its last iteration.
    Progressed,
    /// The goal is done, optionally with the sim it ended up targeting.
    Completed { target: Option<SimId> },
}

/// One visible goal in a [`GoalUpdate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalUpdateEntry {
    pub instance_id: GoalInstanceId,
    pub goal_id: GoalId,
    pub display_text: String,
    pub count: u32,
    pub iterations: u32,
    pub highlighted: bool,
}

/// Snapshot of the realized goals sent to the situation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoalUpdate {
    /// Visible goals in slot order.
    pub goals: Vec<GoalUpdateEntry>,
    pub completed_goal: Option<GoalInstanceId>,
}
