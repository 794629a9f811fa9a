//! Errors surfaced by the tracker.
//!
//! Graph operations never fail. Errors only come from configuration and from
//! save data that does not fit the tracker it is loaded into.

use goal_tuning::GoalId;
use thiserror::Error;

use crate::seedling::GoalTrackerType;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Goals were already offered, saved goals cannot be loaded")]
    AlreadyOffered,

    #[error("Saved goal {0} is not part of this situation's goal chains")]
    UnknownGoal(GoalId),

    #[error("Seedling was written by {0:?}, expected a graphed goal tracker")]
    WrongTrackerType(GoalTrackerType),

    #[error("Invalid tracker configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to encode or decode goal seedling: {0}")]
    Serialization(#[from] serde_json::Error),
}
