//! Goal Graph module - dependency-ordered unlocking of chained goals.
//!
//! The graph consists of:
//! - **Unlocks**: forward edges, completing a goal unlocks its successors
//! - **Requires**: reverse edges, the goals a successor depends on
//! - **Frontier**: the unlocked and completed goal id lists, the only mutable part

mod graph;
mod policy;

pub use graph::*;
pub use policy::*;
