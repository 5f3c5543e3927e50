//! # Reconcile
//!
//! Declarative reconciliation of gateway consumers, their credentials and
//! their ACL group memberships.
//!
//! Given desired entries and a way to query live state, this crate decides
//! which create, update and remove actions would bring the gateway in line.
//! It performs no I/O: fetching live state and applying actions belong to
//! the caller.
//!
//! ## Core Concepts
//!
//! - **Entry**: One declared resource (consumer, credential or ACL membership)
//! - **Resolver**: A validated entry whose outcome still depends on live state
//! - **Inspector**: Read-only queries against live state, one trait per kind
//! - **Action**: The outcome: create, update, remove or no-op
//!
//! Building resolvers validates entries and never touches live state.
//! Resolving them is a separate step that takes an inspector, so the same
//! decisions can run against a REST client, a [`LiveSnapshot`] or a stub.
//!
//! ## Example
//!
//! ```
//! use reconcile::{
//!     Action, ConsumerEntry, CredentialEntry, LiveSnapshot, reconcile_consumers,
//!     reconcile_credentials, resolve_all,
//! };
//!
//! let live = LiveSnapshot::default();
//!
//! let consumers = reconcile_consumers(&[ConsumerEntry::present("marketplace")])?;
//! let credentials = reconcile_credentials(
//!     "marketplace",
//!     &[CredentialEntry::present("key-auth", Default::default())],
//! )?;
//!
//! let mut actions = resolve_all(&consumers, &live)?;
//! actions.extend(resolve_all(&credentials, &live)?);
//!
//! assert!(actions.iter().all(|a| matches!(a, Action::Create { .. })));
//! # Ok::<(), reconcile::Error>(())
//! ```

pub mod acl;
pub mod consumer;
pub mod credential;
pub mod decision;
pub mod entry;
pub mod error;
pub mod inspector;
pub mod snapshot;
pub mod summary;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use acl::{AclResolver, reconcile_acls};
pub use consumer::{ConsumerResolver, reconcile_consumers};
pub use credential::{CredentialResolver, reconcile_credentials};
pub use decision::{LiveState, PendingDecision, Resolve, resolve_all};
pub use entry::{AclEntry, ConsumerEntry, CredentialEntry};
pub use error::{Error, Result};
pub use inspector::{AclInspector, ConsumerInspector, CredentialInspector};
pub use snapshot::{LiveAcl, LiveConsumer, LiveCredential, LiveSnapshot, attributes_match};
pub use summary::{PlanSummary, group_by_kind};
pub use types::{Action, Attributes, EntityKind, Ensure, Target};
