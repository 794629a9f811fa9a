//! Goal Graph - the unlock structure built from a situation's goal chains.

use goal_tuning::{GoalChainCatalog, GoalChainNode, GoalId, SituationGoal};
use std::collections::{HashMap, HashSet};

use super::PrerequisitePolicy;
use crate::seedling::GraphedGoalSeedling;

/// Answers which goals are already in play.
///
/// The graph consults this when offering so a goal that is currently active
/// is not handed out a second time.
pub trait RealizedGoals {
    /// Whether a goal with this id is currently realized.
    fn is_realized(&self, goal_id: GoalId) -> bool;

    /// Whether nothing is realized at all.
    fn is_empty(&self) -> bool;
}

impl RealizedGoals for HashSet<GoalId> {
    fn is_realized(&self, goal_id: GoalId) -> bool {
        self.contains(&goal_id)
    }

    fn is_empty(&self) -> bool {
        HashSet::is_empty(self)
    }
}

impl RealizedGoals for [GoalId] {
    fn is_realized(&self, goal_id: GoalId) -> bool {
        self.contains(&goal_id)
    }

    fn is_empty(&self) -> bool {
        <[GoalId]>::is_empty(self)
    }
}

/// Unlock graph of a situation's minor goals.
///
/// Structure (`unlocks`, `requires`, `goals`) is fixed once constructed. Only
/// the unlocked and completed id lists change afterwards, and a goal id is
/// never present in both.
#[derive(Debug, Clone, Default)]
pub struct GoalGraph {
    /// Forward edges: completing the key unlocks these goals, in tuned order.
    unlocks: HashMap<GoalId, Vec<GoalId>>,

    /// Reverse edges: the key requires these goals.
    requires: HashMap<GoalId, Vec<GoalId>>,

    /// Every goal reachable from the roots.
    goals: HashMap<GoalId, SituationGoal>,

    /// Goals eligible to be offered, oldest unlock first.
    unlocked_ids: Vec<GoalId>,

    /// Goals the player finished, in completion order.
    completed_ids: Vec<GoalId>,

    policy: PrerequisitePolicy,
}

impl GoalGraph {
    /// Build the graph with the default prerequisite policy.
    pub fn construct(catalog: &GoalChainCatalog) -> Self {
        Self::with_policy(catalog, PrerequisitePolicy::default())
    }

    /// Build the graph from the catalog's root chains.
    ///
    /// A catalog without roots yields an inactive graph on which every
    /// operation is a no-op.
    pub fn with_policy(catalog: &GoalChainCatalog, policy: PrerequisitePolicy) -> Self {
        let mut graph = Self {
            policy,
            ..Self::default()
        };

        if catalog.is_empty() {
            tracing::debug!("No minor goal chains tuned, goal graph stays inactive");
            return graph;
        }

        graph.create_graphs(catalog);
        tracing::debug!(
            goals = graph.goals.len(),
            edges = graph.unlocks.values().map(Vec::len).sum::<usize>(),
            "Built goal graph"
        );
        graph
    }

    /// Expand the chains depth-first with an explicit work-list.
    ///
    /// Each node is expanded once, so chains that loop back terminate.
    fn create_graphs(&mut self, catalog: &GoalChainCatalog) {
        let mut nodes: Vec<&GoalChainNode> = catalog.root_nodes().collect();
        let mut expanded: HashSet<GoalId> = HashSet::new();

        while let Some(node_a) = nodes.pop() {
            if !expanded.insert(node_a.goal) {
                continue;
            }

            let Some(goal_a) = catalog.goal(node_a.goal) else {
                tracing::warn!(
                    goal_id = %node_a.goal,
                    "Chain node has no goal definition, skipping"
                );
                continue;
            };
            self.goals.entry(goal_a.id).or_insert_with(|| goal_a.clone());

            for &goal_b_id in &node_a.chained {
                let (Some(goal_b), Some(node_b)) =
                    (catalog.goal(goal_b_id), catalog.node(goal_b_id))
                else {
                    tracing::warn!(
                        from = %node_a.goal,
                        goal_id = %goal_b_id,
                        "Chained goal is not defined, dropping edge"
                    );
                    continue;
                };
                self.goals.entry(goal_b_id).or_insert_with(|| goal_b.clone());

                let unlocks = self.unlocks.entry(node_a.goal).or_default();
                if !unlocks.contains(&goal_b_id) {
                    unlocks.push(goal_b_id);
                }

                let requires = self.requires.entry(goal_b_id).or_default();
                if !requires.contains(&node_a.goal) {
                    requires.push(node_a.goal);
                }

                nodes.push(node_b);
            }
        }
    }

    /// Drop all structure and progress.
    pub fn clear(&mut self) {
        self.unlocks.clear();
        self.requires.clear();
        self.goals.clear();
        self.unlocked_ids.clear();
        self.completed_ids.clear();
    }

    /// False when the situation tuned no goal chains.
    pub fn is_active(&self) -> bool {
        !self.goals.is_empty()
    }

    pub fn policy(&self) -> PrerequisitePolicy {
        self.policy
    }

    /// Look up a goal reachable from the roots.
    pub fn goal(&self, goal_id: GoalId) -> Option<&SituationGoal> {
        self.goals.get(&goal_id)
    }

    /// Goals unlocked by completing `goal_id`.
    pub fn unlocks(&self, goal_id: GoalId) -> &[GoalId] {
        self.unlocks.get(&goal_id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Goals `goal_id` depends on.
    pub fn requires(&self, goal_id: GoalId) -> &[GoalId] {
        self.requires.get(&goal_id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn unlocked_ids(&self) -> &[GoalId] {
        &self.unlocked_ids
    }

    pub fn completed_ids(&self) -> &[GoalId] {
        &self.completed_ids
    }

    pub fn is_unlocked(&self, goal_id: GoalId) -> bool {
        self.unlocked_ids.contains(&goal_id)
    }

    pub fn is_completed(&self, goal_id: GoalId) -> bool {
        self.completed_ids.contains(&goal_id)
    }

    /// Unlock the root goals of a fresh session.
    ///
    /// Does nothing once any goal has been completed, since the unlocked
    /// list then already reflects restored progress. Roots already unlocked
    /// are not added again.
    pub fn seed_unlocked(&mut self, roots: &[GoalId]) {
        if !self.completed_ids.is_empty() {
            return;
        }

        for root in roots {
            if self.goals.contains_key(root) && !self.unlocked_ids.contains(root) {
                self.unlocked_ids.push(*root);
            }
        }
    }

    /// Record a completed goal and unlock whatever it leads to.
    ///
    /// Returns the goals unlocked by this completion, in unlock order.
    pub fn on_goal_complete(&mut self, goal_id: GoalId) -> Vec<GoalId> {
        self.add_completed_goal(goal_id);
        self.try_add_new_unlocked_goals(goal_id)
    }

    /// Move `goal_id` from unlocked to completed.
    ///
    /// Goals the graph never unlocked are ignored.
    fn add_completed_goal(&mut self, goal_id: GoalId) -> bool {
        match self.unlocked_ids.iter().position(|id| *id == goal_id) {
            Some(index) => {
                self.unlocked_ids.remove(index);
                self.completed_ids.push(goal_id);
                true
            }
            None => {
                tracing::debug!(goal_id = %goal_id, "Completed goal was not unlocked, ignoring");
                false
            }
        }
    }

    fn try_add_new_unlocked_goals(&mut self, goal_id: GoalId) -> Vec<GoalId> {
        let mut newly_unlocked = Vec::new();
        let Some(candidates) = self.unlocks.get(&goal_id) else {
            return newly_unlocked;
        };

        for candidate in candidates {
            if self.unlocked_ids.contains(candidate) || self.completed_ids.contains(candidate) {
                continue;
            }

            let requires = self.requires.get(candidate).map(|v| v.as_slice()).unwrap_or(&[]);
            if self.policy.is_satisfied(requires, &self.completed_ids) {
                self.unlocked_ids.push(*candidate);
                newly_unlocked.push(*candidate);
            } else {
                tracing::debug!(
                    goal_id = %candidate,
                    "Chained goal still waiting on prerequisites"
                );
            }
        }

        newly_unlocked
    }

    /// Up to `n` unlocked goals that are not already realized, oldest unlock first.
    pub fn offer<R>(&self, n: usize, realized: &R) -> Vec<&SituationGoal>
    where
        R: RealizedGoals + ?Sized,
    {
        self.unlocked_ids
            .iter()
            .filter(|id| realized.is_empty() || !realized.is_realized(**id))
            .filter_map(|id| self.goals.get(id))
            .take(n)
            .collect()
    }

    /// Snapshot the frontier for saving.
    pub fn save(&self) -> GraphedGoalSeedling {
        GraphedGoalSeedling {
            completed_goals_ids: self.completed_ids.clone(),
            unlocked_goals_ids: self.unlocked_ids.clone(),
        }
    }

    /// Merge saved progress into a graph whose structure is already built.
    pub fn load(&mut self, seedling: &GraphedGoalSeedling) {
        self.load_completed_ids(&seedling.completed_goals_ids);
        self.load_unlocked_ids(&seedling.unlocked_goals_ids);
    }

    /// Append saved completed ids.
    ///
    /// Ids the current tuning no longer knows are dropped.
    pub fn load_completed_ids(&mut self, ids: &[GoalId]) {
        for &id in ids {
            if !self.accepts_loaded_id(id) || self.completed_ids.contains(&id) {
                continue;
            }
            self.unlocked_ids.retain(|unlocked| *unlocked != id);
            self.completed_ids.push(id);
        }
    }

    /// Append saved unlocked ids.
    ///
    /// Ids that are unknown, already unlocked or already completed are dropped.
    pub fn load_unlocked_ids(&mut self, ids: &[GoalId]) {
        for &id in ids {
            if !self.accepts_loaded_id(id)
                || self.unlocked_ids.contains(&id)
                || self.completed_ids.contains(&id)
            {
                continue;
            }
            self.unlocked_ids.push(id);
        }
    }

    fn accepts_loaded_id(&self, id: GoalId) -> bool {
        if self.goals.contains_key(&id) {
            return true;
        }
        if self.is_active() {
            tracing::warn!(goal_id = %id, "Saved goal is not in the goal graph, dropping it");
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(links: &[(u64, u64)], roots: &[u64]) -> GoalChainCatalog {
        let mut catalog = GoalChainCatalog::new();
        for &(from, to) in links {
            catalog.add_goal(SituationGoal::new(GoalId(from), format!("goal_{from}")));
            catalog.add_goal(SituationGoal::new(GoalId(to), format!("goal_{to}")));
        }
        for &root in roots {
            catalog.add_goal(SituationGoal::new(GoalId(root), format!("goal_{root}")));
        }
        for &(from, to) in links {
            catalog.add_chain(GoalId(from), GoalId(to));
        }
        for &root in roots {
            catalog.add_root(GoalId(root));
        }
        catalog
    }

    fn ids(raw: &[u64]) -> Vec<GoalId> {
        raw.iter().copied().map(GoalId).collect()
    }

    const A: u64 = 1;
    const B: u64 = 2;
    const C: u64 = 3;
    const D: u64 = 4;

    fn linear() -> GoalChainCatalog {
        catalog(&[(A, B), (B, C)], &[A])
    }

    fn diamond() -> GoalChainCatalog {
        catalog(&[(A, B), (A, C), (B, D), (C, D)], &[A])
    }

    #[test]
    fn test_construct_edges() {
        let graph = GoalGraph::construct(&diamond());

        assert!(graph.is_active());
        assert_eq!(graph.unlocks(GoalId(A)), ids(&[B, C]).as_slice());
        assert_eq!(graph.unlocks(GoalId(D)), &[] as &[GoalId]);

        let mut requires_d = graph.requires(GoalId(D)).to_vec();
        requires_d.sort();
        assert_eq!(requires_d, ids(&[B, C]));

        for id in [A, B, C, D] {
            assert!(graph.goal(GoalId(id)).is_some());
        }
        assert!(graph.goal(GoalId(99)).is_none());
    }

    #[test]
    fn test_empty_roots_inactive() {
        let mut graph = GoalGraph::construct(&GoalChainCatalog::new());
        assert!(!graph.is_active());

        graph.seed_unlocked(&ids(&[A]));
        assert!(graph.on_goal_complete(GoalId(A)).is_empty());
        graph.load(&GraphedGoalSeedling {
            completed_goals_ids: ids(&[A]),
            unlocked_goals_ids: ids(&[B]),
        });

        assert!(graph.unlocked_ids().is_empty());
        assert!(graph.completed_ids().is_empty());
        assert!(graph.offer(3, &HashSet::<GoalId>::new()).is_empty());
    }

    #[test]
    fn test_construct_terminates_on_cycle() {
        let graph = GoalGraph::construct(&catalog(&[(A, B), (B, A)], &[A]));

        assert_eq!(graph.unlocks(GoalId(A)), ids(&[B]).as_slice());
        assert_eq!(graph.unlocks(GoalId(B)), ids(&[A]).as_slice());
    }

    #[test]
    fn test_cycle_does_not_reunlock_completed() {
        let mut graph = GoalGraph::construct(&catalog(&[(A, B), (B, A)], &[A]));
        graph.seed_unlocked(&ids(&[A]));

        graph.on_goal_complete(GoalId(A));
        let unlocked = graph.on_goal_complete(GoalId(B));

        assert!(unlocked.is_empty());
        assert!(graph.unlocked_ids().is_empty());
        assert_eq!(graph.completed_ids(), ids(&[A, B]).as_slice());
    }

    #[test]
    fn test_undefined_successor_dropped() {
        let mut tuning = catalog(&[], &[A]);
        tuning.add_chain(GoalId(A), GoalId(42));

        let graph = GoalGraph::construct(&tuning);
        assert!(graph.unlocks(GoalId(A)).is_empty());
        assert!(graph.goal(GoalId(42)).is_none());
    }

    #[test]
    fn test_seed_unlocked_in_root_order() {
        let tuning = catalog(&[(A, B)], &[C, A]);
        let mut graph = GoalGraph::construct(&tuning);

        graph.seed_unlocked(tuning.roots());
        assert_eq!(graph.unlocked_ids(), ids(&[C, A]).as_slice());
    }

    #[test]
    fn test_seed_unlocked_idempotent() {
        let tuning = linear();
        let mut graph = GoalGraph::construct(&tuning);

        graph.seed_unlocked(tuning.roots());
        let once = graph.unlocked_ids().to_vec();
        graph.seed_unlocked(tuning.roots());

        assert_eq!(graph.unlocked_ids(), once.as_slice());
    }

    #[test]
    fn test_seed_skipped_after_progress() {
        let tuning = linear();
        let mut graph = GoalGraph::construct(&tuning);
        graph.load_completed_ids(&ids(&[A]));
        graph.load_unlocked_ids(&ids(&[B]));

        graph.seed_unlocked(tuning.roots());
        assert_eq!(graph.unlocked_ids(), ids(&[B]).as_slice());
    }

    #[test]
    fn test_linear_chain_scenario() {
        let tuning = linear();
        let mut graph = GoalGraph::construct(&tuning);
        graph.seed_unlocked(tuning.roots());

        assert_eq!(graph.unlocked_ids(), ids(&[A]).as_slice());
        assert!(graph.completed_ids().is_empty());

        assert_eq!(graph.on_goal_complete(GoalId(A)), ids(&[B]));
        assert_eq!(graph.unlocked_ids(), ids(&[B]).as_slice());
        assert_eq!(graph.completed_ids(), ids(&[A]).as_slice());

        graph.on_goal_complete(GoalId(B));
        assert_eq!(graph.unlocked_ids(), ids(&[C]).as_slice());
        assert_eq!(graph.completed_ids(), ids(&[A, B]).as_slice());

        let offered: Vec<_> = graph
            .offer(1, &HashSet::<GoalId>::new())
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(offered, ids(&[C]));
    }

    #[test]
    fn test_completion_moves_never_duplicates() {
        let tuning = diamond();
        let mut graph = GoalGraph::construct(&tuning);
        graph.seed_unlocked(tuning.roots());
        graph.on_goal_complete(GoalId(A));

        graph.on_goal_complete(GoalId(B));
        graph.on_goal_complete(GoalId(B));

        let b_count = graph.completed_ids().iter().filter(|id| **id == GoalId(B)).count();
        assert_eq!(b_count, 1);
        assert!(!graph.is_unlocked(GoalId(B)));
        for id in graph.unlocked_ids() {
            assert!(!graph.is_completed(*id));
        }
    }

    #[test]
    fn test_untracked_completion_ignored() {
        let tuning = linear();
        let mut graph = GoalGraph::construct(&tuning);
        graph.seed_unlocked(tuning.roots());

        let unlocked = graph.on_goal_complete(GoalId(B));

        assert!(unlocked.is_empty());
        assert_eq!(graph.unlocked_ids(), ids(&[A]).as_slice());
        assert!(graph.completed_ids().is_empty());
    }

    #[test]
    fn test_unlock_monotonicity() {
        let tuning = diamond();
        let mut graph = GoalGraph::construct(&tuning);
        graph.seed_unlocked(tuning.roots());

        let mut seen = graph.unlocked_ids().len() + graph.completed_ids().len();
        for id in [A, C, B, D, A] {
            graph.on_goal_complete(GoalId(id));
            let now = graph.unlocked_ids().len() + graph.completed_ids().len();
            assert!(now >= seen);
            seen = now;
        }
        assert_eq!(graph.completed_ids(), ids(&[A, C, B, D]).as_slice());
    }

    #[test]
    fn test_diamond_all_required_waits_for_both() {
        let tuning = diamond();
        let mut graph = GoalGraph::with_policy(&tuning, PrerequisitePolicy::AllRequired);
        graph.seed_unlocked(tuning.roots());

        graph.on_goal_complete(GoalId(A));
        assert_eq!(graph.unlocked_ids(), ids(&[B, C]).as_slice());

        assert!(graph.on_goal_complete(GoalId(B)).is_empty());
        assert_eq!(graph.unlocked_ids(), ids(&[C]).as_slice());

        assert_eq!(graph.on_goal_complete(GoalId(C)), ids(&[D]));
        assert_eq!(graph.unlocked_ids(), ids(&[D]).as_slice());
    }

    #[test]
    fn test_diamond_any_required_unlocks_early() {
        let tuning = diamond();
        let mut graph = GoalGraph::with_policy(&tuning, PrerequisitePolicy::AnyRequired);
        graph.seed_unlocked(tuning.roots());

        graph.on_goal_complete(GoalId(A));
        assert_eq!(graph.on_goal_complete(GoalId(B)), ids(&[D]));
        assert_eq!(graph.unlocked_ids(), ids(&[C, D]).as_slice());

        // D is already unlocked, C must not add it a second time.
        assert!(graph.on_goal_complete(GoalId(C)).is_empty());
        assert_eq!(graph.unlocked_ids(), ids(&[D]).as_slice());
    }

    #[test]
    fn test_offer_respects_cap() {
        let tuning = catalog(&[(A, B), (A, C), (A, D)], &[A]);
        let mut graph = GoalGraph::construct(&tuning);
        graph.seed_unlocked(tuning.roots());
        graph.on_goal_complete(GoalId(A));

        let realized: HashSet<GoalId> = HashSet::new();
        for n in 0..5 {
            assert!(graph.offer(n, &realized).len() <= n);
        }
        assert!(graph.offer(0, &realized).is_empty());
        assert_eq!(graph.offer(10, &realized).len(), 3);
    }

    #[test]
    fn test_offer_excludes_realized() {
        let tuning = catalog(&[(A, B), (A, C), (A, D)], &[A]);
        let mut graph = GoalGraph::construct(&tuning);
        graph.seed_unlocked(tuning.roots());
        graph.on_goal_complete(GoalId(A));

        let realized = ids(&[B]);
        let offered: Vec<_> = graph
            .offer(2, realized.as_slice())
            .into_iter()
            .map(|g| g.id)
            .collect();

        assert_eq!(offered, ids(&[C, D]));
    }

    #[test]
    fn test_offer_nothing_unlocked() {
        let graph = GoalGraph::construct(&linear());
        assert!(graph.offer(3, &HashSet::<GoalId>::new()).is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let tuning = diamond();
        let mut graph = GoalGraph::construct(&tuning);
        graph.seed_unlocked(tuning.roots());
        graph.on_goal_complete(GoalId(A));
        graph.on_goal_complete(GoalId(C));

        let saved = graph.save();

        let mut restored = GoalGraph::construct(&tuning);
        restored.load(&saved);

        assert_eq!(restored.unlocked_ids(), graph.unlocked_ids());
        assert_eq!(restored.completed_ids(), graph.completed_ids());
        assert_eq!(restored.unlocked_ids(), ids(&[B]).as_slice());
        assert_eq!(restored.completed_ids(), ids(&[A, C]).as_slice());
    }

    #[test]
    fn test_load_drops_unknown_and_conflicting_ids() {
        let mut graph = GoalGraph::construct(&linear());

        graph.load(&GraphedGoalSeedling {
            completed_goals_ids: ids(&[A, 77]),
            unlocked_goals_ids: ids(&[A, B, B]),
        });

        assert_eq!(graph.completed_ids(), ids(&[A]).as_slice());
        assert_eq!(graph.unlocked_ids(), ids(&[B]).as_slice());
    }

    #[test]
    fn test_construct_deep_chain() {
        const LEN: u64 = 100_000;
        let mut tuning = GoalChainCatalog::new();
        for id in 0..LEN {
            tuning.add_goal(SituationGoal::new(GoalId(id), format!("goal_{id}")));
        }
        for id in 1..LEN {
            tuning.add_chain(GoalId(id - 1), GoalId(id));
        }
        tuning.add_root(GoalId(0));

        let mut graph = GoalGraph::construct(&tuning);
        assert_eq!(graph.unlocks(GoalId(LEN - 2)), &[GoalId(LEN - 1)]);
        assert_eq!(graph.requires(GoalId(LEN - 1)), &[GoalId(LEN - 2)]);

        graph.seed_unlocked(tuning.roots());
        for id in 0..5 {
            graph.on_goal_complete(GoalId(id));
        }

        assert_eq!(graph.unlocked_ids(), &[GoalId(5)]);
        assert_eq!(graph.completed_ids(), ids(&[0, 1, 2, 3, 4]).as_slice());
    }

    #[test]
    fn test_load_completed_after_unlocked() {
        let mut graph = GoalGraph::construct(&linear());

        graph.load_unlocked_ids(&ids(&[A]));
        graph.load_completed_ids(&ids(&[A]));

        assert!(graph.unlocked_ids().is_empty());
        assert_eq!(graph.completed_ids(), ids(&[A]).as_slice());
    }

    #[test]
    fn test_clear() {
        let tuning = linear();
        let mut graph = GoalGraph::construct(&tuning);
        graph.seed_unlocked(tuning.roots());

        graph.clear();

        assert!(!graph.is_active());
        assert!(graph.unlocked_ids().is_empty());
        assert!(graph.unlocks(GoalId(A)).is_empty());
    }
}
