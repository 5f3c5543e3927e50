//! ACL group membership reconciliation
//!
//! Membership is a pure presence relation, so an ACL entry only ever
//! creates, removes or leaves a membership alone.

use crate::decision::{LiveState, PendingDecision, Resolve};
use crate::entry::AclEntry;
use crate::error::{Result, require};
use crate::inspector::AclInspector;
use crate::types::{Action, Attributes, EntityKind, Target};

/// Deferred decision for one ACL entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclResolver {
    decision: PendingDecision,
    consumer: String,
    group: String,
}

impl AclResolver {
    pub fn decision(&self) -> &PendingDecision {
        &self.decision
    }

    pub fn consumer(&self) -> &str {
        &self.consumer
    }

    pub fn group(&self) -> &str {
        &self.group
    }
}

impl<I: AclInspector + ?Sized> Resolve<I> for AclResolver {
    fn resolve(&self, inspector: &I) -> Result<Action> {
        self.decision.resolve(&LiveMembership {
            inspector,
            consumer: &self.consumer,
            group: &self.group,
        })
    }
}

/// Build one resolver per ACL entry of a consumer
pub fn reconcile_acls(consumer: &str, entries: &[AclEntry]) -> Result<Vec<AclResolver>> {
    let consumer = require(Some(consumer), EntityKind::Acl, "consumer")?;

    entries
        .iter()
        .map(|entry| {
            let group = require(entry.group.as_deref(), EntityKind::Acl, "group")?;
            let target = Target::Acl {
                consumer: consumer.to_string(),
                group: group.to_string(),
            };
            let mut payload = Attributes::new();
            payload.insert("group".into(), group.into());

            Ok(AclResolver {
                decision: PendingDecision::new(target, payload, entry.ensure),
                consumer: consumer.to_string(),
                group: group.to_string(),
            })
        })
        .collect()
}

struct LiveMembership<'a, I: ?Sized> {
    inspector: &'a I,
    consumer: &'a str,
    group: &'a str,
}

impl<I: AclInspector + ?Sized> LiveState for LiveMembership<'_, I> {
    fn exists(&self) -> anyhow::Result<bool> {
        self.inspector.exists(self.consumer, self.group)
    }

    fn identity(&self) -> anyhow::Result<String> {
        self.inspector.identity(self.consumer, self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::resolve_all;
    use crate::testing::StubInspector;
    use crate::types::Ensure;
    use serde_json::json;

    fn target(group: &str) -> Target {
        Target::Acl {
            consumer: "app-name".into(),
            group: group.into(),
        }
    }

    #[test]
    fn test_add_acl() {
        let resolvers = reconcile_acls("app-name", &[AclEntry::present("super-group-name")]).unwrap();
        let actions = resolve_all(&resolvers, &StubInspector::absent()).unwrap();

        let mut attributes = Attributes::new();
        attributes.insert("group".into(), json!("super-group-name"));
        assert_eq!(
            actions,
            vec![Action::Create {
                target: target("super-group-name"),
                attributes,
            }]
        );
    }

    #[test]
    fn test_remove_consumer_acl() {
        let resolvers = reconcile_acls("app-name", &[AclEntry::removed("super-group-name")]).unwrap();
        let actions = resolve_all(&resolvers, &StubInspector::live("1234")).unwrap();

        assert_eq!(
            actions,
            vec![Action::Remove {
                target: target("super-group-name"),
                id: "1234".into(),
            }]
        );
    }

    #[test]
    fn test_existing_membership_never_checks_currency() {
        // currency is left unstubbed and would fail if asked
        let inspector = StubInspector::live("1234");
        let resolvers = reconcile_acls("app-name", &[AclEntry::present("admins")]).unwrap();
        let action = resolvers[0].resolve(&inspector).unwrap();

        assert_eq!(action, Action::NoOp { target: target("admins") });
        assert_eq!(inspector.calls(), vec!["exists(app-name, admins)"]);
    }

    #[test]
    fn test_remove_missing_membership_is_noop() {
        let resolvers = reconcile_acls("app-name", &[AclEntry::removed("admins")]).unwrap();
        let inspector = StubInspector::absent();
        for _ in 0..2 {
            let action = resolvers[0].resolve(&inspector).unwrap();
            assert!(!action.is_change());
        }
    }

    #[test]
    fn test_validate_acl() {
        for ensure in [None, Some(Ensure::Present), Some(Ensure::Removed)] {
            let entries = [AclEntry { ensure, group: None }];
            let err = reconcile_acls("app-name", &entries).unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.to_string(), "ACL group must be specified");
        }

        let err = reconcile_acls(" ", &[AclEntry::present("admins")]).unwrap_err();
        assert_eq!(err.to_string(), "ACL consumer must be specified");
    }

    #[test]
    fn test_acl_accessors() {
        let resolvers = reconcile_acls("app-name", &[AclEntry::present("admins")]).unwrap();
        assert_eq!(resolvers[0].consumer(), "app-name");
        assert_eq!(resolvers[0].group(), "admins");
        assert_eq!(resolvers[0].decision().target(), &target("admins"));
    }
}
