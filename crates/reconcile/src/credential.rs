//! Credential reconciliation
//!
//! Every credential type (`oauth2`, `jwt`, `basic-auth`, `key-auth`, ...)
//! shares one shape: a type tag plus an attribute map. Attributes pass
//! through untouched; checking them against a type's schema is left to
//! whoever applies the actions.

use crate::decision::{LiveState, PendingDecision, Resolve};
use crate::entry::CredentialEntry;
use crate::error::{Result, require};
use crate::inspector::CredentialInspector;
use crate::types::{Action, Attributes, EntityKind, Target};

/// Deferred decision for one credential entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialResolver {
    decision: PendingDecision,
    consumer: String,
    name: String,
}

impl CredentialResolver {
    pub fn decision(&self) -> &PendingDecision {
        &self.decision
    }

    pub fn consumer(&self) -> &str {
        &self.consumer
    }

    /// Credential type tag
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<I: CredentialInspector + ?Sized> Resolve<I> for CredentialResolver {
    fn resolve(&self, inspector: &I) -> Result<Action> {
        self.decision.resolve(&LiveCredential {
            inspector,
            consumer: &self.consumer,
            name: &self.name,
        })
    }
}

/// Build one resolver per credential entry of a consumer
pub fn reconcile_credentials(
    consumer: &str,
    entries: &[CredentialEntry],
) -> Result<Vec<CredentialResolver>> {
    let consumer = require(Some(consumer), EntityKind::Credential, "consumer")?;

    entries
        .iter()
        .map(|entry| {
            let name = require(entry.name.as_deref(), EntityKind::Credential, "name")?;
            let target = Target::Credential {
                consumer: consumer.to_string(),
                name: name.to_string(),
            };
            Ok(CredentialResolver {
                decision: PendingDecision::new(target, entry.attributes.clone(), entry.ensure),
                consumer: consumer.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

struct LiveCredential<'a, I: ?Sized> {
    inspector: &'a I,
    consumer: &'a str,
    name: &'a str,
}

impl<I: CredentialInspector + ?Sized> LiveState for LiveCredential<'_, I> {
    fn exists(&self) -> anyhow::Result<bool> {
        self.inspector.exists(self.consumer, self.name)
    }

    fn identity(&self) -> anyhow::Result<String> {
        self.inspector.identity(self.consumer, self.name)
    }

    fn is_current(&self, desired: &Attributes) -> anyhow::Result<bool> {
        self.inspector.is_current(self.consumer, self.name, desired)
    }
}
