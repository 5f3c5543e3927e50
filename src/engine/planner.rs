//! Reconcile planner - builds resolvers for a whole gateway config

use anyhow::Result;
use reconcile::{
    AclInspector, AclResolver, Action, ConsumerInspector, ConsumerResolver, CredentialInspector,
    CredentialResolver, EntityKind, reconcile_acls, reconcile_consumers, reconcile_credentials,
    resolve_all,
};

use crate::config::GatewayConfig;

/// Resolvers for every entry in a config, grouped by kind
///
/// Consumers come first so that a consumer is created before its
/// credentials and memberships.
#[derive(Debug, Default)]
pub struct ReconcilePlan {
    pub consumers: Vec<ConsumerResolver>,
    pub credentials: Vec<CredentialResolver>,
    pub acls: Vec<AclResolver>,
}

impl ReconcilePlan {
    /// Validate a config and build its resolvers
    ///
    /// Credentials and ACLs of a consumer being removed are validated but
    /// not planned: removing the consumer removes them too.
    pub fn build(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;

        let entries: Vec<_> = config.consumers.iter().map(|c| c.entry.clone()).collect();
        let mut plan = Self {
            consumers: reconcile_consumers(&entries)?,
            ..Self::default()
        };

        for (consumer, resolver) in config.consumers.iter().zip(&plan.consumers) {
            let credentials = reconcile_credentials(resolver.username(), &consumer.credentials)?;
            let acls = reconcile_acls(resolver.username(), &consumer.acls)?;

            if consumer.is_removed() {
                if !credentials.is_empty() || !acls.is_empty() {
                    log::debug!(
                        "Skipping credentials and ACLs of removed consumer {}",
                        resolver.username()
                    );
                }
                continue;
            }
            plan.credentials.extend(credentials);
            plan.acls.extend(acls);
        }

        log::info!(
            "Planned {} consumers, {} credentials, {} ACLs",
            plan.consumers.len(),
            plan.credentials.len(),
            plan.acls.len()
        );
        Ok(plan)
    }

    /// Resolve every decision against live state, in plan order
    pub fn resolve<I>(&self, inspector: &I) -> Result<Vec<Action>>
    where
        I: ConsumerInspector + CredentialInspector + AclInspector,
    {
        let mut actions = resolve_all(&self.consumers, inspector)?;
        actions.extend(resolve_all(&self.credentials, inspector)?);
        actions.extend(resolve_all(&self.acls, inspector)?);
        Ok(actions)
    }

    /// Filter plan to only include resolvers matching a target pattern
    ///
    /// Target format: "kind" or "kind.consumer"
    pub fn filter_by_target(self, target: Option<&str>) -> Result<Self> {
        let Some(target) = target else {
            return Ok(self);
        };
        let (kind, consumer) = parse_target(target)?;
        let keep = |k: EntityKind, owner: &str| {
            kind.is_none_or(|want| want == k) && consumer.as_deref().is_none_or(|c| c == owner)
        };

        Ok(Self {
            consumers: self
                .consumers
                .into_iter()
                .filter(|r| keep(EntityKind::Consumer, r.username()))
                .collect(),
            credentials: self
                .credentials
                .into_iter()
                .filter(|r| keep(EntityKind::Credential, r.consumer()))
                .collect(),
            acls: self
                .acls
                .into_iter()
                .filter(|r| keep(EntityKind::Acl, r.consumer()))
                .collect(),
        })
    }

    /// Total number of resolvers in the plan
    pub fn len(&self) -> usize {
        self.consumers.len() + self.credentials.len() + self.acls.len()
    }

    /// Check if plan is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a target string like "credentials.app-name" into (kind, consumer)
///
/// A bare name that is not a kind selects everything of that consumer.
fn parse_target(target: &str) -> Result<(Option<EntityKind>, Option<String>)> {
    let (head, rest) = match target.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (target, None),
    };

    let kind = EntityKind::ALL
        .into_iter()
        .find(|k| head == k.plural() || k.plural().strip_suffix('s') == Some(head));

    match (kind, rest) {
        (Some(kind), Some(consumer)) if !consumer.is_empty() => {
            Ok((Some(kind), Some(consumer.to_string())))
        }
        (Some(kind), None) => Ok((Some(kind), None)),
        (None, _) if !target.is_empty() => Ok((None, Some(target.to_string()))),
        _ => anyhow::bail!("Invalid target '{}'", target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateFile;
    use reconcile::{LiveSnapshot, PlanSummary, Target};
    use serde_json::json;
    use std::path::Path;

    fn config() -> GatewayConfig {
        serde_json::from_value(json!({
            "consumers": [
                {
                    "username": "app-name",
                    "credentials": [{"name": "oauth2", "attributes": {"client_id": "foo"}}],
                    "acls": [{"group": "admins"}]
                },
                {
                    "username": "legacy",
                    "ensure": "removed",
                    "credentials": [{"name": "jwt"}],
                    "acls": [{"group": "admins"}]
                },
                {
                    "username": "marketplace",
                    "acls": [{"group": "super-group-name", "ensure": "removed"}]
                }
            ]
        }))
        .unwrap()
    }

    fn live() -> LiveSnapshot {
        serde_json::from_value(json!({
            "consumers": [
                {"username": "legacy", "acls": [{"id": "1", "group": "admins"}]},
                {"username": "marketplace", "acls": [{"id": "1234", "group": "super-group-name"}]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(
            parse_target("credentials").unwrap(),
            (Some(EntityKind::Credential), None)
        );
        assert_eq!(
            parse_target("acls.app-name").unwrap(),
            (Some(EntityKind::Acl), Some("app-name".to_string()))
        );
        assert_eq!(
            parse_target("marketplace").unwrap(),
            (None, Some("marketplace".to_string()))
        );
        assert_eq!(
            parse_target("consumer.legacy").unwrap(),
            (Some(EntityKind::Consumer), Some("legacy".to_string()))
        );
        assert!(parse_target("").is_err());
        assert!(parse_target("acls.").is_err());
    }

    #[test]
    fn test_build_skips_children_of_removed_consumers() {
        let plan = ReconcilePlan::build(&config()).unwrap();
        assert_eq!(plan.consumers.len(), 3);
        assert_eq!(plan.credentials.len(), 1);
        assert_eq!(plan.acls.len(), 2);
        assert!(plan.acls.iter().all(|a| a.consumer() != "legacy"));
        assert_eq!(plan.len(), 6);
    }

    #[test]
    fn test_build_validates_children_of_removed_consumers() {
        let config: GatewayConfig = serde_json::from_value(json!({
            "consumers": [{
                "username": "legacy",
                "ensure": "removed",
                "credentials": [{"attributes": {"key": "k"}}]
            }]
        }))
        .unwrap();
        let err = ReconcilePlan::build(&config).unwrap_err();
        assert_eq!(err.to_string(), "Credential name must be specified");

        let config: GatewayConfig = serde_json::from_value(json!({
            "consumers": [{
                "username": "legacy",
                "ensure": "removed",
                "acls": [{"name": "acls"}]
            }]
        }))
        .unwrap();
        let err = ReconcilePlan::build(&config).unwrap_err();
        assert_eq!(err.to_string(), "ACL group must be specified");
    }

    #[test]
    fn test_build_fails_on_invalid_entry() {
        let config: GatewayConfig = serde_json::from_value(json!({
            "consumers": [{"username": "app-name", "acls": [{"name": "acls"}]}]
        }))
        .unwrap();
        let err = ReconcilePlan::build(&config).unwrap_err();
        assert_eq!(err.to_string(), "ACL group must be specified");
    }

    #[test]
    fn test_build_fails_on_missing_username() {
        let config: GatewayConfig =
            serde_json::from_value(json!({"consumers": [{"ensure": "present"}]})).unwrap();
        let err = ReconcilePlan::build(&config).unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_resolve_orders_consumers_first() {
        let plan = ReconcilePlan::build(&config()).unwrap();
        let actions = plan.resolve(&live()).unwrap();

        let kinds: Vec<_> = actions.iter().map(|a| a.target().kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Consumer,
                EntityKind::Consumer,
                EntityKind::Consumer,
                EntityKind::Credential,
                EntityKind::Acl,
                EntityKind::Acl,
            ]
        );

        assert!(matches!(actions[0], Action::Create { .. }));
        assert_eq!(
            actions[1],
            Action::Remove {
                target: Target::Consumer {
                    username: "legacy".into()
                },
                id: "legacy".into(),
            }
        );
        assert!(matches!(actions[2], Action::NoOp { .. }));
        assert!(matches!(actions[3], Action::Create { .. }));
        assert!(matches!(actions[4], Action::Create { .. }));
        assert_eq!(
            actions[5],
            Action::Remove {
                target: Target::Acl {
                    consumer: "marketplace".into(),
                    group: "super-group-name".into(),
                },
                id: "1234".into(),
            }
        );
    }

    #[test]
    fn test_filter_by_target() {
        let plan = ReconcilePlan::build(&config())
            .unwrap()
            .filter_by_target(Some("acls"))
            .unwrap();
        assert!(plan.consumers.is_empty());
        assert!(plan.credentials.is_empty());
        assert_eq!(plan.acls.len(), 2);

        let plan = ReconcilePlan::build(&config())
            .unwrap()
            .filter_by_target(Some("marketplace"))
            .unwrap();
        assert_eq!(plan.consumers.len(), 1);
        assert_eq!(plan.acls.len(), 1);

        let plan = ReconcilePlan::build(&config())
            .unwrap()
            .filter_by_target(Some("credentials.nobody"))
            .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_demo_files() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
        let config = GatewayConfig::load(&demos.join("gateway.toml")).unwrap();
        let state = StateFile::load(Some(&demos.join("live.json"))).unwrap();

        let actions = ReconcilePlan::build(&config)
            .unwrap()
            .resolve(&state.snapshot)
            .unwrap();
        let summary = PlanSummary::from_actions(&actions);

        assert_eq!(actions.len(), 8);
        assert_eq!(summary.creates, 1);
        assert_eq!(summary.updates, 1);
        assert_eq!(summary.removals, 2);
        assert_eq!(summary.unchanged, 4);
    }
}
