//! Situation Graphed Goal Tracker - drives a goal graph for one situation.
//!
//! The tracker keeps up to `max_minor_goals` realized goals. Whenever a slot
//! frees up it asks the graph for unlocked goals that are not already in play:
//! 1. **Seed**: a fresh session unlocks the root goals
//! 2. **Offer**: unlocked goals fill the free slots, oldest unlock first
//! 3. **Complete**: a finished goal leaves its slot and unlocks its successors
//! 4. **Refresh**: the freed slot is offered again and the situation is updated

mod host;

pub use host::*;

use goal_tuning::{GoalChainCatalog, GoalId, SimId};

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::goal_graph::GoalGraph;
use crate::realized::{ActiveGoal, GoalInstanceId, RealizedGoalManager};
use crate::seedling::{GoalTrackerSeedling, GoalTrackerType};

/// Goal tracker for situations whose minor goals are tuned as chains.
pub struct SituationGraphedGoalTracker<H: SituationHost> {
    host: H,
    config: TrackerConfig,
    roots: Vec<GoalId>,
    graph: GoalGraph,
    realized: RealizedGoalManager,
    has_offered_goals: bool,
    inherited_target: Option<SimId>,
}

impl<H: SituationHost> SituationGraphedGoalTracker<H> {
    /// Create a tracker and build its goal graph from the situation's tuning.
    pub fn new(catalog: &GoalChainCatalog, host: H, config: TrackerConfig) -> Self {
        let graph = GoalGraph::with_policy(catalog, config.prerequisite_policy);
        let realized = RealizedGoalManager::new(config.max_minor_goals);

        Self {
            host,
            roots: catalog.roots().to_vec(),
            graph,
            realized,
            has_offered_goals: false,
            inherited_target: None,
            config,
        }
    }

    /// Create a tracker with the default configuration.
    pub fn with_defaults(catalog: &GoalChainCatalog, host: H) -> Self {
        Self::new(catalog, host, TrackerConfig::default())
    }

    /// Drop all goals and graph state.
    pub fn destroy(&mut self) {
        self.graph.clear();
        self.realized.clear();
    }

    pub fn graph(&self) -> &GoalGraph {
        &self.graph
    }

    pub fn realized(&self) -> &RealizedGoalManager {
        &self.realized
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn has_offered_goals(&self) -> bool {
        self.has_offered_goals
    }

    /// Target carried over from the last completed goal.
    pub fn inherited_target(&self) -> Option<SimId> {
        self.inherited_target
    }

    /// Fill free slots with unlocked goals.
    ///
    /// Returns false when every slot is taken or the graph had nothing to
    /// offer.
    pub fn offer_goals(&mut self) -> bool {
        if !self.realized.can_add_new_goal() {
            return false;
        }

        self.graph.seed_unlocked(&self.roots);
        self.has_offered_goals = true;

        let actor = self.host.goal_actor();
        let wanted = self.config.max_minor_goals.saturating_sub(self.realized.len());
        let candidates = self.graph.offer(wanted, &self.realized);
        if candidates.is_empty() {
            return false;
        }

        for goal in candidates {
            if !self.realized.can_add_new_goal() {
                break;
            }
            if !self.host.can_give_goal(goal, actor, self.inherited_target) {
                tracing::debug!(goal_id = %goal.id, "Situation refused goal");
                continue;
            }

            let active = ActiveGoal::new(goal, actor, self.inherited_target);
            tracing::debug!(goal_id = %goal.id, instance_id = %active.instance_id, "Offered goal");
            self.realized.add_goal(active);
        }

        true
    }

    /// Handle a progress callback from a realized goal.
    ///
    /// Returns true when the goal completed.
    pub fn on_goal_progress(&mut self, instance_id: GoalInstanceId, outcome: GoalOutcome) -> bool {
        let target = match outcome {
            GoalOutcome::Completed { target } => target,
            GoalOutcome::Progressed => {
                let Some(goal) = self.realized.get_mut(instance_id) else {
                    return false;
                };
                if !goal.advance() {
                    self.send_goal_update(None);
                    return false;
                }
                None
            }
        };

        self.complete_goal(instance_id, target)
    }

    /// Complete a realized goal regardless of its progress.
    pub fn debug_force_complete(
        &mut self,
        instance_id: GoalInstanceId,
        target: Option<SimId>,
    ) -> bool {
        self.complete_goal(instance_id, target)
    }

    fn complete_goal(&mut self, instance_id: GoalInstanceId, target: Option<SimId>) -> bool {
        let Some(goal) = self.realized.remove_goal(instance_id) else {
            tracing::debug!(
                instance_id = %instance_id,
                "Completion for a goal that is not realized"
            );
            return false;
        };

        let unlocked = self.graph.on_goal_complete(goal.goal_id);
        tracing::debug!(
            goal_id = %goal.goal_id,
            unlocked = unlocked.len(),
            "Goal completed"
        );

        self.inherited_target = target;
        self.host.on_goal_completed(&goal);
        self.refresh_goals(Some(&goal));
        true
    }

    /// Offer into any free slots and push the new state to the situation.
    pub fn refresh_goals(&mut self, completed_goal: Option<&ActiveGoal>) {
        self.offer_goals();
        self.send_goal_update(completed_goal.map(|goal| goal.instance_id));
    }

    /// Send the visible realized goals to the situation.
    pub fn send_goal_update(&mut self, completed_goal: Option<GoalInstanceId>) {
        let mut highlight = self.config.highlight_first_incomplete;
        let goals = self
            .realized
            .goals()
            .filter(|goal| goal.visible)
            .map(|goal| {
                let display_text = self
                    .graph
                    .goal(goal.goal_id)
                    .map(|tuned| tuned.display_text().to_string())
                    .unwrap_or_else(|| goal.goal_id.to_string());
                let highlighted = std::mem::take(&mut highlight);
                GoalUpdateEntry {
                    instance_id: goal.instance_id,
                    goal_id: goal.goal_id,
                    display_text,
                    count: goal.count,
                    iterations: goal.iterations,
                    highlighted,
                }
            })
            .collect();

        self.host.send_goal_update(GoalUpdate {
            goals,
            completed_goal,
        });
    }

    /// Realized goals in slot order.
    pub fn goal_info(&self) -> Vec<&ActiveGoal> {
        self.realized.goals().collect()
    }

    pub fn all_goals(&self) -> impl Iterator<Item = &ActiveGoal> {
        self.realized.goals()
    }

    pub fn save_to_seedling(&self) -> GoalTrackerSeedling {
        let mut seedling = GoalTrackerSeedling::graphed(
            self.has_offered_goals,
            SimId::from_option(self.inherited_target),
        );
        for goal in self.realized.goals() {
            seedling.add_minor_goal(goal.to_seedling());
        }
        seedling.graphed_goal_seedling = self.graph.save();
        seedling
    }

    /// Restore saved goals. Must run before anything is offered.
    pub fn load_from_seedling(
        &mut self,
        seedling: &GoalTrackerSeedling,
    ) -> Result<(), TrackerError> {
        if self.has_offered_goals {
            return Err(TrackerError::AlreadyOffered);
        }
        if seedling.tracker_type != GoalTrackerType::StandardGraphedGoalTracker {
            return Err(TrackerError::WrongTrackerType(seedling.tracker_type));
        }

        let mut restored = Vec::with_capacity(seedling.minor_goals.len());
        for goal_seedling in &seedling.minor_goals {
            let goal = self
                .graph
                .goal(goal_seedling.goal_id)
                .ok_or(TrackerError::UnknownGoal(goal_seedling.goal_id))?;
            restored.push(ActiveGoal::from_seedling(goal_seedling, goal));
        }

        self.has_offered_goals = seedling.has_offered_goals;
        self.inherited_target = seedling.inherited_target_id.into_option();

        for goal in restored {
            let goal_id = goal.goal_id;
            if !self.realized.add_goal(goal) {
                tracing::warn!(goal_id = %goal_id, "No free slot for saved goal, dropping it");
            }
        }

        self.graph.load(&seedling.graphed_goal_seedling);
        tracing::debug!(
            realized = self.realized.len(),
            unlocked = self.graph.unlocked_ids().len(),
            completed = self.graph.completed_ids().len(),
            "Loaded goal tracker"
        );

        self.send_goal_update(None);
        Ok(())
    }
}
