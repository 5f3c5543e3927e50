//! Core types for gateway reconciliation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque credential attributes, keyed by attribute name
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Desired presence of a resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    /// Resource should exist and be current
    #[default]
    Present,
    /// Resource should not exist
    Removed,
}

impl Ensure {
    /// Check if this intent asks for the resource to exist
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present)
    }
}

impl fmt::Display for Ensure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Removed => write!(f, "removed"),
        }
    }
}

/// Kind of gateway entity being reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Consumer,
    Credential,
    Acl,
}

impl EntityKind {
    /// Every kind, in reconcile order
    pub const ALL: [Self; 3] = [Self::Consumer, Self::Credential, Self::Acl];

    /// Plural name used in target filters
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Consumer => "consumers",
            Self::Credential => "credentials",
            Self::Acl => "acls",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consumer => write!(f, "Consumer"),
            Self::Credential => write!(f, "Credential"),
            Self::Acl => write!(f, "ACL"),
        }
    }
}

/// Identity key of a reconciled resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// A consumer, identified by username
    Consumer { username: String },
    /// A credential of one type owned by a consumer
    Credential { consumer: String, name: String },
    /// A consumer's membership in an ACL group
    Acl { consumer: String, group: String },
}

impl Target {
    /// Entity kind of this target
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Consumer { .. } => EntityKind::Consumer,
            Self::Credential { .. } => EntityKind::Credential,
            Self::Acl { .. } => EntityKind::Acl,
        }
    }

    /// Owning consumer (the consumer itself for consumer targets)
    pub fn consumer(&self) -> &str {
        match self {
            Self::Consumer { username } => username,
            Self::Credential { consumer, .. } | Self::Acl { consumer, .. } => consumer,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consumer { username } => write!(f, "{username}"),
            Self::Credential { consumer, name } => write!(f, "{consumer}/{name}"),
            Self::Acl { consumer, group } => write!(f, "{consumer}/{group}"),
        }
    }
}

/// Concrete outcome of resolving one decision against live state
///
/// Actions are data. Applying them against the gateway is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Resource is missing and should be created
    Create { target: Target, attributes: Attributes },
    /// Resource exists with stale attributes
    Update {
        target: Target,
        id: String,
        attributes: Attributes,
    },
    /// Resource exists and should be removed
    Remove { target: Target, id: String },
    /// Live state already matches
    NoOp { target: Target },
}

impl Action {
    /// Target this action applies to
    pub fn target(&self) -> &Target {
        match self {
            Self::Create { target, .. }
            | Self::Update { target, .. }
            | Self::Remove { target, .. }
            | Self::NoOp { target } => target,
        }
    }

    /// Check if the action changes live state
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::NoOp { .. })
    }

    /// Short verb for display
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Remove { .. } => "remove",
            Self::NoOp { .. } => "no-op",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ensure_defaults_to_present() {
        assert_eq!(Ensure::default(), Ensure::Present);
        let ensure: Ensure = serde_json::from_value(json!("removed")).unwrap();
        assert_eq!(ensure, Ensure::Removed);
        assert!(serde_json::from_value::<Ensure>(json!("absent")).is_err());
    }

    #[test]
    fn test_action_serializes_tagged() {
        let action = Action::Remove {
            target: Target::Acl {
                consumer: "app-name".into(),
                group: "super-group-name".into(),
            },
            id: "1234".into(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({
                "action": "remove",
                "target": {"kind": "acl", "consumer": "app-name", "group": "super-group-name"},
                "id": "1234"
            })
        );
    }

    #[test]
    fn test_entity_kind_plural() {
        let names: Vec<_> = EntityKind::ALL.iter().map(EntityKind::plural).collect();
        assert_eq!(names, ["consumers", "credentials", "acls"]);
    }

    #[test]
    fn test_target_accessors() {
        let target = Target::Credential {
            consumer: "app-name".into(),
            name: "jwt".into(),
        };
        assert_eq!(target.kind(), EntityKind::Credential);
        assert_eq!(target.consumer(), "app-name");
        assert_eq!(target.to_string(), "app-name/jwt");
    }
}
