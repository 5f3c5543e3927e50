//! State inspector traits
//!
//! These traits let the reconcilers query live gateway state without
//! depending on how that state is fetched. A REST client, a cached
//! snapshot or a test stub can all stand behind them.
//!
//! Every method is a pure query. Errors are returned as `anyhow::Error`
//! and reach the caller of `resolve` unchanged.

use crate::types::Attributes;
use anyhow::Result;

/// Live-state queries for consumers
pub trait ConsumerInspector {
    /// Check if a consumer with this username exists
    fn exists(&self, username: &str) -> Result<bool>;
}

/// Live-state queries for consumer credentials
///
/// Credentials are addressed by owning consumer and credential type.
pub trait CredentialInspector {
    /// Check if the consumer has a credential of this type
    fn exists(&self, consumer: &str, name: &str) -> Result<bool>;

    /// Id of the live credential
    ///
    /// Only called after `exists` returned true.
    fn identity(&self, consumer: &str, name: &str) -> Result<String>;

    /// Check if the live credential already carries the desired attributes
    ///
    /// How attributes are compared is up to the implementation; see
    /// [`attributes_match`](crate::attributes_match) for the rule
    /// [`LiveSnapshot`](crate::LiveSnapshot) uses.
    fn is_current(&self, consumer: &str, name: &str, desired: &Attributes) -> Result<bool>;
}

/// Live-state queries for ACL group memberships
pub trait AclInspector {
    /// Check if the consumer is a member of the group
    fn exists(&self, consumer: &str, group: &str) -> Result<bool>;

    /// Id of the live membership record
    ///
    /// Only called after `exists` returned true.
    fn identity(&self, consumer: &str, group: &str) -> Result<String>;
}
