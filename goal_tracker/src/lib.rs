//! # Goal Tracker
//!
//! Runtime side of situation minor goals. A situation's tuned goal chains are
//! turned into an unlock graph; as the player completes goals, their
//! successors become eligible and are offered into a small set of active
//! slots.
//!
//! ## Core Components
//!
//! - **goal_graph**: Unlock/requires graph plus the unlocked and completed frontier
//! - **realized**: Fixed-size slots holding the goals currently in play
//! - **tracker**: Per-situation adapter that drives the graph from goal callbacks
//! - **seedling**: Save data for the tracker and its graph
//!
//! The graph is single-writer: a tracker and everything it owns must stay on
//! the thread that runs its situation.

pub mod config;
pub mod error;
pub mod goal_graph;
pub mod realized;
pub mod seedling;
pub mod tracker;

pub use config::*;
pub use error::*;
pub use goal_graph::*;
pub use realized::*;
pub use seedling::*;
pub use tracker::*;
