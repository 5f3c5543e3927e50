//! Error types for reconciliation.
//!
//! Only two things can go wrong: an entry is missing the field that
//! identifies it (caught while building decisions), or the state inspector
//! fails while a decision is being resolved.

use crate::types::EntityKind;
use thiserror::Error;

/// Errors that can occur while reconciling entries.
#[derive(Debug, Error)]
pub enum Error {
    /// A required identity field is absent or empty
    #[error("{kind} {field} must be specified")]
    MissingField {
        /// Kind of entry that failed validation
        kind: EntityKind,
        /// Name of the missing field
        field: &'static str,
    },

    /// The state inspector failed; passed through untouched
    #[error(transparent)]
    Inspector(#[from] anyhow::Error),
}

impl Error {
    /// Build a validation error for a missing field.
    pub fn missing(kind: EntityKind, field: &'static str) -> Self {
        Self::MissingField { kind, field }
    }

    /// Whether this error was raised while building decisions.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}

/// Result type for reconciliation.
pub type Result<T> = std::result::Result<T, Error>;

/// Return the trimmed value of a required field, or a validation error.
pub(crate) fn require<'a>(
    value: Option<&'a str>,
    kind: EntityKind,
    field: &'static str,
) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::missing(kind, field)),
    }
}
