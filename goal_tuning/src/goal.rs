//! Goal definitions - the tuned goals a situation can offer.

use serde::Serialize;

use super::GoalId;

/// A tuned situation goal.
///
/// The goal graph only ever looks at `id`; the remaining fields are carried
/// for the owning tracker and whatever presents goals to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SituationGoal {
    pub id: GoalId,

    /// Designer-facing name.
    pub name: String,

    /// Player-facing text, if it differs from `name`.
    pub display_text: Option<String>,

    /// How many times the goal's test must pass before it completes.
    pub iterations: u32,

    /// Hidden goals still count but are left out of goal updates.
    pub visible: bool,
}

impl SituationGoal {
    /// Create a new goal with the given id and name.
    pub fn new(id: GoalId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            display_text: None,
            iterations: 1,
            visible: true,
        }
    }

    /// Set the player-facing text.
    pub fn with_display_text(mut self, text: impl Into<String>) -> Self {
        self.display_text = Some(text.into());
        self
    }

    /// Set the number of iterations. Zero is treated as one.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Set whether the goal shows up in goal updates.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Text to show the player.
    pub fn display_text(&self) -> &str {
        self.display_text.as_deref().unwrap_or(&self.name)
    }
}
