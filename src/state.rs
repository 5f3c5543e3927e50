use anyhow::Result;
use chrono::{DateTime, Utc};
use reconcile::LiveSnapshot;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::load_file;

// ============================================================================
// State File
// ============================================================================

/// Live gateway state captured to disk
///
/// The file holds the snapshot's consumers plus an optional capture time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateFile {
    /// When the state was captured from the gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub snapshot: LiveSnapshot,
}

impl StateFile {
    /// Load captured state, or an empty gateway when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::debug!("No state file given, planning against an empty gateway");
            return Ok(Self::default());
        };

        let state: Self = load_file(path)?;
        log::debug!(
            "Loaded {} live records from {}",
            state.snapshot.len(),
            path.display()
        );
        Ok(state)
    }

    /// Age of the capture, if the capture time is known
    pub fn age(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.captured_at.map(|at| now - at)
    }
}

// ============================================================================
// Tests
// ============================================================================
