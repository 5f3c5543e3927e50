//! Shared decision protocol
//!
//! Reconcilers turn each entry into a [`PendingDecision`] without touching
//! live state. Later, a decision is resolved against a [`LiveState`] view of
//! the single resource it is about, giving exactly one [`Action`].
//!
//! Resolution order is fixed: existence first, then currency, then the
//! identity lookup needed by `Update` and `Remove`. A resource that does not
//! exist is created, never updated, and removing something that was never
//! there is a no-op.

use crate::error::Result;
use crate::types::{Action, Attributes, Ensure, Target};

/// Live state of the one resource a decision is about
///
/// Each reconciler adapts its inspector trait to this view by binding the
/// decision's identity key.
pub trait LiveState {
    /// Check if the resource exists
    fn exists(&self) -> anyhow::Result<bool>;

    /// Id of the live resource, used by `Update` and `Remove`
    fn identity(&self) -> anyhow::Result<String>;

    /// Check if the live resource matches the desired attributes
    ///
    /// Kinds without a currency concept keep the default: anything that
    /// exists is current.
    fn is_current(&self, _desired: &Attributes) -> anyhow::Result<bool> {
        Ok(true)
    }
}

/// A validated entry waiting for live state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDecision {
    target: Target,
    attributes: Attributes,
    ensure: Ensure,
}

impl PendingDecision {
    /// Create a decision, defaulting a missing `ensure` to present
    pub fn new(target: Target, attributes: Attributes, ensure: Option<Ensure>) -> Self {
        Self {
            target,
            attributes,
            ensure: ensure.unwrap_or_default(),
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn ensure(&self) -> Ensure {
        self.ensure
    }

    /// Resolve against live state
    pub fn resolve(&self, live: &impl LiveState) -> Result<Action> {
        let target = self.target.clone();
        let exists = live.exists()?;

        let action = match self.ensure {
            Ensure::Removed if !exists => Action::NoOp { target },
            Ensure::Removed => Action::Remove {
                target,
                id: live.identity()?,
            },
            Ensure::Present if !exists => Action::Create {
                target,
                attributes: self.attributes.clone(),
            },
            Ensure::Present => {
                if live.is_current(&self.attributes)? {
                    Action::NoOp { target }
                } else {
                    Action::Update {
                        target,
                        id: live.identity()?,
                        attributes: self.attributes.clone(),
                    }
                }
            }
        };

        log::debug!(
            "{} {} (ensure {}, exists {}): {}",
            self.target.kind(),
            self.target,
            self.ensure,
            exists,
            action.verb()
        );
        Ok(action)
    }
}

/// A deferred decision that yields one action given an inspector
pub trait Resolve<I: ?Sized> {
    /// Resolve against the inspector's view of live state
    fn resolve(&self, inspector: &I) -> Result<Action>;
}

/// Resolve every decision in order
///
/// Returns one action per resolver, in input order. Stops at the first
/// inspector failure.
pub fn resolve_all<I, R>(resolvers: &[R], inspector: &I) -> Result<Vec<Action>>
where
    I: ?Sized,
    R: Resolve<I>,
{
    resolvers.iter().map(|r| r.resolve(inspector)).collect()
}
