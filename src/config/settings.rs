//! Settings and key-list parsing
//!
//! Keys arrive as a comma-separated environment value; entries are split,
//! trimmed, and blanks dropped before the list reaches a pool.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::pool::{KeyPool, PoolConfig};

/// Split a comma-separated key list, trimming entries and dropping blanks.
pub fn split_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a comma-separated key list from an environment variable.
///
/// A missing or empty variable yields an empty list.
pub fn keys_from_env(var: &str) -> Vec<String> {
    env::var(var)
        .map(|raw| split_key_list(&raw))
        .unwrap_or_default()
}

/// Pool settings loaded from the environment
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// API keys, in rotation order. Never serialized.
    #[serde(skip_serializing)]
    pub api_keys: Vec<String>,

    /// Consecutive errors before a key is considered exhausted
    pub max_errors: u32,
}

impl Settings {
    /// Load settings from environment variables with defaults.
    ///
    /// Reads `API_KEYS` (comma-separated) and `MAX_KEY_ERRORS`. A `.env`
    /// file is honored when present.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Self {
            api_keys: keys_from_env("API_KEYS"),
            max_errors: env_or_default("MAX_KEY_ERRORS", "3")
                .parse()
                .context("Invalid MAX_KEY_ERRORS value")?,
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings.
    fn validate(&self) -> Result<()> {
        if self.max_errors == 0 {
            anyhow::bail!("max_errors must be > 0");
        }

        if self.api_keys.is_empty() {
            tracing::warn!("no API keys configured, every run will fail fast");
        }

        Ok(())
    }

    /// Build a key pool for one request batch from these settings.
    pub fn pool(&self) -> KeyPool {
        KeyPool::with_config(
            self.api_keys.clone(),
            PoolConfig::new().with_max_errors(self.max_errors),
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            max_errors: 3,
        }
    }
}

/// Helper function to get environment variable with default
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
