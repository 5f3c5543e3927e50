//! Consumer reconciliation
//!
//! Consumers are keyed by username and have no mutable attributes in this
//! model, so the only outcomes are create, remove and no-op.

use crate::decision::{LiveState, PendingDecision, Resolve};
use crate::entry::ConsumerEntry;
use crate::error::{Result, require};
use crate::inspector::ConsumerInspector;
use crate::types::{Action, Attributes, EntityKind, Target};

/// Deferred decision for one consumer entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerResolver {
    decision: PendingDecision,
    username: String,
}

impl ConsumerResolver {
    pub fn decision(&self) -> &PendingDecision {
        &self.decision
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl<I: ConsumerInspector + ?Sized> Resolve<I> for ConsumerResolver {
    fn resolve(&self, inspector: &I) -> Result<Action> {
        self.decision.resolve(&LiveConsumer {
            inspector,
            username: &self.username,
        })
    }
}

/// Build one resolver per consumer entry
///
/// Fails on the first entry without a username; nothing is returned for the
/// rest of the batch.
pub fn reconcile_consumers(entries: &[ConsumerEntry]) -> Result<Vec<ConsumerResolver>> {
    entries
        .iter()
        .map(|entry| {
            let username =
                require(entry.username.as_deref(), EntityKind::Consumer, "username")?.to_string();
            let target = Target::Consumer {
                username: username.clone(),
            };
            Ok(ConsumerResolver {
                decision: PendingDecision::new(target, Attributes::new(), entry.ensure),
                username,
            })
        })
        .collect()
}

/// A consumer's live id is its username
struct LiveConsumer<'a, I: ?Sized> {
    inspector: &'a I,
    username: &'a str,
}

impl<I: ConsumerInspector + ?Sized> LiveState for LiveConsumer<'_, I> {
    fn exists(&self) -> anyhow::Result<bool> {
        self.inspector.exists(self.username)
    }

    fn identity(&self) -> anyhow::Result<String> {
        Ok(self.username.to_string())
    }
}
