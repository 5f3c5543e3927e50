//! Declarative entries as they come out of a desired-state document
//!
//! Identity fields are optional here so that a missing field reaches the
//! reconcilers and fails with a message naming it, rather than failing
//! somewhere inside a deserializer.

use crate::types::{Attributes, Ensure};
use serde::{Deserialize, Serialize};

/// Desired state of one consumer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumerEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ensure: Option<Ensure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ConsumerEntry {
    /// Entry for a consumer that should exist
    pub fn present(username: impl Into<String>) -> Self {
        Self {
            ensure: Some(Ensure::Present),
            username: Some(username.into()),
        }
    }

    /// Entry for a consumer that should not exist
    pub fn removed(username: impl Into<String>) -> Self {
        Self {
            ensure: Some(Ensure::Removed),
            username: Some(username.into()),
        }
    }
}

/// Desired state of one credential of a consumer
///
/// `name` is the credential type tag (`oauth2`, `jwt`, `basic-auth`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ensure: Option<Ensure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl CredentialEntry {
    /// Entry for a credential that should exist with the given attributes
    pub fn present(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            ensure: Some(Ensure::Present),
            name: Some(name.into()),
            attributes,
        }
    }

    /// Entry for a credential that should not exist
    pub fn removed(name: impl Into<String>) -> Self {
        Self {
            ensure: Some(Ensure::Removed),
            name: Some(name.into()),
            attributes: Attributes::new(),
        }
    }
}

/// Desired membership of a consumer in an ACL group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ensure: Option<Ensure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl AclEntry {
    /// Entry for a membership that should exist
    pub fn present(group: impl Into<String>) -> Self {
        Self {
            ensure: Some(Ensure::Present),
            group: Some(group.into()),
        }
    }

    /// Entry for a membership that should not exist
    pub fn removed(group: impl Into<String>) -> Self {
        Self {
            ensure: Some(Ensure::Removed),
            group: Some(group.into()),
        }
    }
}
