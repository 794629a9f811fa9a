//! Identifier types shared by tuning and runtime.

use serde::{Deserialize, Serialize};

/// Tuning guid of a situation goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(pub u64);

impl GoalId {
    pub fn new(guid: u64) -> Self {
        Self(guid)
    }

    /// The raw 64-bit guid.
    pub fn guid64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for GoalId {
    fn from(guid: u64) -> Self {
        Self(guid)
    }
}

impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a sim acting in, or targeted by, a goal.
///
/// Zero is reserved: save data uses it to mean "no sim".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimId(pub u64);

impl SimId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The reserved "no sim" value.
    pub fn none() -> Self {
        Self(0)
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Converts the persisted form into an optional sim.
    pub fn into_option(self) -> Option<SimId> {
        if self.is_none() {
            None
        } else {
            Some(self)
        }
    }

    pub fn from_option(sim: Option<SimId>) -> Self {
        sim.unwrap_or_else(Self::none)
    }
}

impl std::fmt::Display for SimId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
