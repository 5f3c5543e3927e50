//! Summaries over resolved actions

use crate::types::{Action, EntityKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts of each action kind in a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Resources to create
    pub creates: usize,
    /// Resources to update
    pub updates: usize,
    /// Resources to remove
    pub removals: usize,
    /// Resources already in the desired state
    pub unchanged: usize,
}

impl PlanSummary {
    /// Create a summary from a list of actions
    pub fn from_actions(actions: &[Action]) -> Self {
        let mut summary = Self::default();
        for action in actions {
            summary.add(action);
        }
        summary
    }

    /// Count one action
    pub fn add(&mut self, action: &Action) {
        match action {
            Action::Create { .. } => self.creates += 1,
            Action::Update { .. } => self.updates += 1,
            Action::Remove { .. } => self.removals += 1,
            Action::NoOp { .. } => self.unchanged += 1,
        }
    }

    /// Total number of changes
    pub fn changes(&self) -> usize {
        self.creates + self.updates + self.removals
    }

    /// Total number of actions, no-ops included
    pub fn total(&self) -> usize {
        self.changes() + self.unchanged
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.changes() > 0
    }
}

/// Group actions by entity kind, keeping their order within each kind
pub fn group_by_kind(actions: &[Action]) -> BTreeMap<EntityKind, Vec<&Action>> {
    let mut groups: BTreeMap<EntityKind, Vec<&Action>> = BTreeMap::new();
    for action in actions {
        groups.entry(action.target().kind()).or_default().push(action);
    }
    groups
}
