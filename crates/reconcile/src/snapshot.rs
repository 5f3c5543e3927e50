//! In-memory snapshot of live gateway state
//!
//! Capturing live state once and resolving every decision against the
//! snapshot avoids one round trip per query. The snapshot implements all
//! three inspector traits.

use crate::inspector::{AclInspector, ConsumerInspector, CredentialInspector};
use crate::types::Attributes;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Live consumers with their credentials and ACL memberships
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveSnapshot {
    #[serde(default)]
    pub consumers: Vec<LiveConsumer>,
}

/// A consumer as it exists in the gateway
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveConsumer {
    pub username: String,
    #[serde(default)]
    pub credentials: Vec<LiveCredential>,
    #[serde(default)]
    pub acls: Vec<LiveAcl>,
}

/// A credential record, including any server-generated attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveCredential {
    pub id: String,
    /// Credential type tag
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
}

/// An ACL membership record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveAcl {
    pub id: String,
    pub group: String,
}

impl LiveSnapshot {
    /// Find a consumer by username
    pub fn consumer(&self, username: &str) -> Option<&LiveConsumer> {
        self.consumers.iter().find(|c| c.username == username)
    }

    /// Find a consumer's credential by type
    pub fn credential(&self, consumer: &str, name: &str) -> Option<&LiveCredential> {
        self.consumer(consumer)?
            .credentials
            .iter()
            .find(|c| c.name == name)
    }

    /// Find a consumer's membership in a group
    pub fn acl(&self, consumer: &str, group: &str) -> Option<&LiveAcl> {
        self.consumer(consumer)?.acls.iter().find(|a| a.group == group)
    }

    /// Total number of live records
    pub fn len(&self) -> usize {
        self.consumers
            .iter()
            .map(|c| 1 + c.credentials.len() + c.acls.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }
}

/// Check if live attributes already carry every desired attribute
///
/// Each desired key must be present live with an equal value. Keys only
/// present live are ignored, since the gateway adds its own (`id`,
/// `created_at`, ...). Objects compare regardless of key order; arrays
/// compare element by element.
pub fn attributes_match(desired: &Attributes, live: &Attributes) -> bool {
    desired
        .iter()
        .all(|(key, value)| live.get(key) == Some(value))
}

impl ConsumerInspector for LiveSnapshot {
    fn exists(&self, username: &str) -> Result<bool> {
        Ok(self.consumer(username).is_some())
    }
}

impl CredentialInspector for LiveSnapshot {
    fn exists(&self, consumer: &str, name: &str) -> Result<bool> {
        Ok(self.credential(consumer, name).is_some())
    }

    fn identity(&self, consumer: &str, name: &str) -> Result<String> {
        match self.credential(consumer, name) {
            Some(credential) => Ok(credential.id.clone()),
            None => bail!("no {name} credential for consumer '{consumer}' in live state"),
        }
    }

    fn is_current(&self, consumer: &str, name: &str, desired: &Attributes) -> Result<bool> {
        match self.credential(consumer, name) {
            Some(credential) => Ok(attributes_match(desired, &credential.attributes)),
            None => bail!("no {name} credential for consumer '{consumer}' in live state"),
        }
    }
}

impl AclInspector for LiveSnapshot {
    fn exists(&self, consumer: &str, group: &str) -> Result<bool> {
        Ok(self.acl(consumer, group).is_some())
    }

    fn identity(&self, consumer: &str, group: &str) -> Result<String> {
        match self.acl(consumer, group) {
            Some(acl) => Ok(acl.id.clone()),
            None => bail!("consumer '{consumer}' is not in ACL group '{group}' in live state"),
        }
    }
}
