//! # Goal Tuning
//!
//! Authoring-time data for situation goals: goal definitions, the chains that
//! link them, and the catalog a situation is tuned with. This crate holds no
//! runtime progress; it is the immutable input the goal graph is built from.

pub mod chain;
pub mod error;
pub mod goal;
pub mod ids;

pub use chain::*;
pub use error::*;
pub use goal::*;
pub use ids::*;
