//! Goal chains - the authoring-time graph of which goal leads to which.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::{GoalId, SituationGoal, TuningError};

/// One goal plus the goals that completing it leads to, in tuned order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalChainNode {
    pub goal: GoalId,
    pub chained: Vec<GoalId>,
}

impl GoalChainNode {
    pub fn new(goal: GoalId) -> Self {
        Self {
            goal,
            chained: Vec::new(),
        }
    }

    /// Whether the chain ends at this goal.
    pub fn is_leaf(&self) -> bool {
        self.chained.is_empty()
    }
}

/// The goal tuning of a single situation.
///
/// Holds every goal definition, the chain node for each goal, and the
/// ordered root goals a fresh situation starts from.
#[derive(Debug, Clone, Default)]
pub struct GoalChainCatalog {
    goals: HashMap<GoalId, SituationGoal>,
    nodes: HashMap<GoalId, GoalChainNode>,
    roots: Vec<GoalId>,
}

/// On-disk form of a catalog.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    roots: Vec<GoalId>,
    #[serde(default)]
    goals: Vec<GoalEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GoalEntry {
    id: GoalId,
    name: String,
    #[serde(default)]
    display_text: Option<String>,
    #[serde(default)]
    iterations: Option<u32>,
    #[serde(default)]
    visible: Option<bool>,
    #[serde(default)]
    chained: Vec<GoalId>,
}

impl GoalChainCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from TOML and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self, TuningError> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut catalog = Self::new();

        for entry in file.goals {
            if catalog.goals.contains_key(&entry.id) {
                return Err(TuningError::DuplicateGoal(entry.id));
            }

            let mut goal = SituationGoal::new(entry.id, entry.name);
            if let Some(text) = entry.display_text {
                goal = goal.with_display_text(text);
            }
            if let Some(iterations) = entry.iterations {
                goal = goal.with_iterations(iterations);
            }
            if let Some(visible) = entry.visible {
                goal = goal.with_visible(visible);
            }

            catalog.add_goal(goal);
            for next in entry.chained {
                catalog.add_chain(entry.id, next);
            }
        }

        for root in file.roots {
            catalog.add_root(root);
        }

        catalog.validate()?;
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Add a goal definition.
    pub fn with_goal(mut self, goal: SituationGoal) -> Self {
        self.add_goal(goal);
        self
    }

    /// Chain `to` after `from`.
    pub fn with_chain(mut self, from: GoalId, to: GoalId) -> Self {
        self.add_chain(from, to);
        self
    }

    /// Add a root goal.
    pub fn with_root(mut self, goal: GoalId) -> Self {
        self.add_root(goal);
        self
    }

    /// Add or replace a goal definition.
    pub fn add_goal(&mut self, goal: SituationGoal) {
        let id = goal.id;
        self.nodes.entry(id).or_insert_with(|| GoalChainNode::new(id));
        self.goals.insert(id, goal);
    }

    /// Append `to` to the successors of `from`. Repeated links are ignored.
    pub fn add_chain(&mut self, from: GoalId, to: GoalId) {
        let node = self
            .nodes
            .entry(from)
            .or_insert_with(|| GoalChainNode::new(from));
        if !node.chained.contains(&to) {
            node.chained.push(to);
        }
    }

    /// Append a root goal. Repeated roots are ignored.
    pub fn add_root(&mut self, goal: GoalId) {
        if !self.roots.contains(&goal) {
            self.roots.push(goal);
        }
    }

    /// Check that every root and chain link names a defined goal.
    pub fn validate(&self) -> Result<(), TuningError> {
        for root in &self.roots {
            if !self.goals.contains_key(root) {
                return Err(TuningError::UnknownRoot(*root));
            }
        }

        for node in self.nodes.values() {
            if !self.goals.contains_key(&node.goal) {
                return Err(TuningError::UndefinedChain(node.goal));
            }
            if let Some(missing) = node.chained.iter().find(|id| !self.goals.contains_key(id)) {
                return Err(TuningError::UnknownSuccessor {
                    from: node.goal,
                    goal: *missing,
                });
            }
        }

        Ok(())
    }

    /// Look up a goal definition.
    pub fn goal(&self, id: GoalId) -> Option<&SituationGoal> {
        self.goals.get(&id)
    }

    /// Look up the chain node of a goal.
    pub fn node(&self, id: GoalId) -> Option<&GoalChainNode> {
        self.nodes.get(&id)
    }

    /// Root goals in tuned order.
    pub fn roots(&self) -> &[GoalId] {
        &self.roots
    }

    /// Chain nodes of the root goals, in tuned order.
    pub fn root_nodes(&self) -> impl Iterator<Item = &GoalChainNode> {
        self.roots.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Number of defined goals.
    pub fn goal_count(&self) -> usize {
        self.goals.len()
    }

    /// A catalog without roots starts no chains.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
