//! Errors raised while loading or validating tuning.

use thiserror::Error;

use crate::GoalId;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("Failed to parse goal tuning: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read goal tuning: {0}")]
    Io(#[from] std::io::Error),

    #[error("Goal {0} is defined more than once")]
    DuplicateGoal(GoalId),

    #[error("Root goal {0} is not defined")]
    UnknownRoot(GoalId),

    #[error("Goal {from} chains to undefined goal {goal}")]
    UnknownSuccessor { from: GoalId, goal: GoalId },

    #[error("Chain declared for undefined goal {0}")]
    UndefinedChain(GoalId),
}
