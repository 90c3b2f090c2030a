//! Key pool implementation
//!
//! This module provides the `KeyPool` that manages an ordered list of API
//! keys with a rotation cursor and per-key health tracking.

use super::health::KeyHealth;
use serde::Serialize;
use std::collections::HashMap;

// ============================================================================
// Pool Configuration
// ============================================================================

/// Configuration for key pool behavior
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Consecutive errors before a key is considered exhausted
    pub max_errors: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { max_errors: 3 }
    }
}

impl PoolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_errors(mut self, max: u32) -> Self {
        self.max_errors = max;
        self
    }
}

// ============================================================================
// Key Pool
// ============================================================================

/// An ordered pool of API keys with weak round-robin rotation.
///
/// The pool owns its state and is meant to be constructed per outbound
/// request batch, driven to completion, then discarded. It is not shared:
/// concurrent callers each build their own pool from the same key list.
///
/// Keys are opaque strings. Blank and whitespace-only entries are dropped at
/// construction; the relative order of the rest is preserved, duplicates
/// included. Exhaustion is a health flag, never removal.
#[derive(Debug)]
pub struct KeyPool {
    /// Ordered keys; rotation order is defined by this list alone
    keys: Vec<String>,
    /// Current rotation position
    cursor: usize,
    /// Health counters keyed by key value, default-zero on first touch
    health: HashMap<String, KeyHealth>,
    /// Pool configuration
    config: PoolConfig,
}

impl KeyPool {
    /// Create a pool with the default configuration.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(keys, PoolConfig::default())
    }

    /// Create a pool with a custom configuration.
    pub fn with_config<I, S>(keys: I, config: PoolConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys
            .into_iter()
            .map(Into::into)
            .filter(|k| !k.trim().is_empty())
            .collect();

        tracing::debug!(total = keys.len(), "initialized key pool");

        Self {
            keys,
            cursor: 0,
            health: HashMap::new(),
            config,
        }
    }

    /// Get the number of keys in the pool.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the pool holds no usable keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Get the first key in the pool, regardless of health.
    ///
    /// One-shot collaborators (status polling, asset download) use this
    /// directly instead of participating in rotation.
    pub fn first(&self) -> Option<&str> {
        self.keys.first().map(String::as_str)
    }

    /// Get the key at the cursor, skipping exhausted keys.
    ///
    /// Scans forward circularly from the cursor for the first healthy key
    /// and parks the cursor on it. If a full lap finds every key exhausted,
    /// all error counts are reset and the key at the cursor is returned, so
    /// a fully exhausted pool never deadlocks the caller. The reset forgives
    /// a genuinely dead key too; pools are request-scoped, so that costs one
    /// wasted attempt rather than a livelock.
    ///
    /// Returns `None` only when the pool holds zero keys. Calling this again
    /// with no intervening mutation returns the same key.
    pub fn current(&mut self) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }

        let len = self.keys.len();
        let start = self.cursor;
        loop {
            let errors = self
                .health
                .get(&self.keys[self.cursor])
                .map_or(0, KeyHealth::error_count);
            if errors < self.config.max_errors {
                break;
            }

            self.cursor = (self.cursor + 1) % len;
            if self.cursor == start {
                tracing::warn!(total = len, "all keys exhausted, resetting error counts");
                for health in self.health.values_mut() {
                    health.clear_errors();
                }
                break;
            }
        }

        Some(&self.keys[self.cursor])
    }

    /// Advance the cursor to the next key, then resolve it as `current` does.
    ///
    /// Returns `None` when the pool is empty.
    pub fn rotate(&mut self) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.keys.len();
        self.current()
    }

    /// Record a successful use of a key.
    ///
    /// Increments the key's success count and clears its error count: one
    /// success fully rehabilitates a key. Unknown keys are counted from
    /// zero rather than rejected.
    pub fn record_success(&mut self, key: &str) {
        self.health
            .entry(key.to_string())
            .or_default()
            .record_success();
    }

    /// Record a failed use of a key.
    ///
    /// Increments the key's error count. Reaching the threshold eagerly
    /// rotates the cursor away so the next `current` call does not have to
    /// scan past the exhausted key. Unknown keys are counted from zero
    /// rather than rejected.
    pub fn record_failure(&mut self, key: &str) {
        let health = self.health.entry(key.to_string()).or_default();
        health.record_failure();
        let errors = health.error_count();

        if errors >= self.config.max_errors {
            tracing::warn!(
                key = %key_label(key),
                errors,
                "key reached error threshold, rotating away"
            );
            self.rotate();
        }
    }

    /// Get the error count for a key (zero if never seen).
    pub fn error_count(&self, key: &str) -> u32 {
        self.health.get(key).map_or(0, KeyHealth::error_count)
    }

    /// Get the success count for a key (zero if never seen).
    pub fn success_count(&self, key: &str) -> u64 {
        self.health.get(key).map_or(0, KeyHealth::success_count)
    }

    /// Get a read-only snapshot of the pool state.
    pub fn stats(&self) -> PoolStats {
        let keys = self
            .keys
            .iter()
            .map(|key| {
                let health = self.health.get(key).cloned().unwrap_or_default();
                let stats = KeyStats {
                    success_count: health.success_count(),
                    error_count: health.error_count(),
                    exhausted: health.is_exhausted(self.config.max_errors),
                };
                (key.clone(), stats)
            })
            .collect();

        PoolStats {
            total: self.keys.len(),
            healthy: self
                .keys
                .iter()
                .filter(|k| self.error_count(k.as_str()) < self.config.max_errors)
                .count(),
            cursor: if self.keys.is_empty() {
                None
            } else {
                Some(self.cursor)
            },
            keys,
        }
    }
}

// ============================================================================
// Pool Statistics
// ============================================================================

/// Statistics snapshot of a key pool (observability only)
#[derive(Debug, Clone, Serialize)]
pub struct PoolStats {
    /// Total number of keys
    pub total: usize,
    /// Number of keys below the error threshold
    pub healthy: usize,
    /// Current cursor position, absent when the pool is empty
    pub cursor: Option<usize>,
    /// Per-key counters
    pub keys: HashMap<String, KeyStats>,
}

/// Per-key counters within a `PoolStats` snapshot
#[derive(Debug, Clone, Serialize)]
pub struct KeyStats {
    pub success_count: u64,
    pub error_count: u32,
    pub exhausted: bool,
}

impl PoolStats {
    /// Check that at least one key is below the error threshold.
    pub fn is_healthy(&self) -> bool {
        self.healthy > 0
    }
}

/// Short non-secret label for a key, safe for logs.
fn key_label(key: &str) -> String {
    const VISIBLE: usize = 4;
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= VISIBLE {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - VISIBLE..].iter().collect();
        format!("****{tail}")
    }
}

// ============================================================================
// Tests
// ============================================================================
