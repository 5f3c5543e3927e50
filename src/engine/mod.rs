//! Planning engine for gatesync
//!
//! The engine orchestrates:
//! 1. Planning - Build resolvers for every entry in the config
//! 2. Resolving - Decide each entry against captured live state
//! 3. Displaying - Show the resulting actions

pub mod differ;
pub mod planner;

pub use differ::display_plan;
pub use planner::ReconcilePlan;
