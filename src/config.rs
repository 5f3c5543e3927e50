use anyhow::{Context, Result, bail};
use reconcile::{AclEntry, ConsumerEntry, CredentialEntry};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("gatesync"))
}

/// Resolve the config path: explicit flag (or env), else the default location
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config_dir()?.join("gateway.toml")),
    }
}

// ============================================================================
// File Formats
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from the file extension, defaulting to TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Read and parse a TOML or JSON file
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;

    match ConfigFormat::from_path(path) {
        ConfigFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display())),
        ConfigFormat::Toml => {
            toml::from_str(&content).with_context(|| format!("Invalid TOML in {}", path.display()))
        }
    }
}

// ============================================================================
// Gateway Config
// ============================================================================

/// Desired state of the gateway's consumers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub consumers: Vec<ConsumerConfig>,
}

/// One consumer with the credentials and ACL groups it should have
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsumerConfig {
    #[serde(flatten)]
    pub entry: ConsumerEntry,
    #[serde(default)]
    pub credentials: Vec<CredentialEntry>,
    #[serde(default)]
    pub acls: Vec<AclEntry>,
}

impl ConsumerConfig {
    /// Username as written in the config, if any
    pub fn username(&self) -> Option<&str> {
        self.entry.username.as_deref().map(str::trim)
    }

    fn validate_children(&self, username: &str) -> Result<()> {
        let mut names = HashSet::new();
        for name in self.credentials.iter().filter_map(|c| c.name.as_deref()) {
            if !names.insert(name.trim()) {
                bail!(
                    "Credential '{}' of consumer '{}' is declared more than once",
                    name.trim(),
                    username
                );
            }
        }

        let mut groups = HashSet::new();
        for group in self.acls.iter().filter_map(|a| a.group.as_deref()) {
            if !groups.insert(group.trim()) {
                bail!(
                    "ACL group '{}' of consumer '{}' is declared more than once",
                    group.trim(),
                    username
                );
            }
        }
        Ok(())
    }

    /// Whether the consumer should be removed
    pub fn is_removed(&self) -> bool {
        !self.entry.ensure.unwrap_or_default().is_present()
    }
}

impl GatewayConfig {
    /// Load a config from a TOML or JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = load_file(path)?;
        log::debug!(
            "Loaded {} consumers from {}",
            config.consumers.len(),
            path.display()
        );
        Ok(config)
    }

    /// Check the config for problems the reconcilers don't see
    ///
    /// Each consumer may only be declared once, and within a consumer each
    /// credential type and ACL group may only appear once.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for consumer in &self.consumers {
            let Some(username) = consumer.username() else {
                continue;
            };
            if !seen.insert(username) {
                bail!("Consumer '{}' is declared more than once", username);
            }
            consumer.validate_children(username)?;
        }
        Ok(())
    }

    /// Consumers that should exist
    pub fn present_consumers(&self) -> impl Iterator<Item = &ConsumerConfig> {
        self.consumers.iter().filter(|c| !c.is_removed())
    }
}

// ============================================================================
// Tests
// ============================================================================
