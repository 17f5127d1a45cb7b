//! Engine configuration.

use crate::table::TableName;
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_retention_days() -> u32 {
    VaultConfig::DEFAULT_RETENTION_DAYS
}

fn default_insert_chunk_size() -> usize {
    VaultConfig::DEFAULT_INSERT_CHUNK_SIZE
}

fn default_list_page_limit() -> usize {
    VaultConfig::DEFAULT_LIST_PAGE_LIMIT
}

/// The single configuration value injected into the export/restore pipelines.
///
/// The ordered table set lives here and nowhere else: both pipelines and the
/// sweeper take it from this one value rather than redeclaring table lists
/// ad hoc.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Tables covered by exports and full restores, in pipeline order.
    pub tables: Vec<TableName>,

    /// Credential required by restore and explicit-delete requests.
    pub restore_secret: RestoreSecret,

    /// Archives older than this many days are removed by the sweeper.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Maximum records per bulk-insert call during restore.
    #[serde(default = "default_insert_chunk_size")]
    pub insert_chunk_size: usize,

    /// Page-size cap for blob-store listings.
    #[serde(default = "default_list_page_limit")]
    pub list_page_limit: usize,

    /// Run a retention sweep after each successful export.
    #[serde(default)]
    pub sweep_after_export: bool,
}

impl VaultConfig {
    /// Default retention horizon in days.
    pub const DEFAULT_RETENTION_DAYS: u32 = 15;

    /// Default bulk-insert chunk size.
    pub const DEFAULT_INSERT_CHUNK_SIZE: usize = 200;

    /// Default listing page cap.
    pub const DEFAULT_LIST_PAGE_LIMIT: usize = 100;

    /// Create a configuration with the given table set and restore secret,
    /// defaults elsewhere.
    pub fn new(tables: Vec<TableName>, restore_secret: RestoreSecret) -> Self {
        Self {
            tables,
            restore_secret,
            retention_days: Self::DEFAULT_RETENTION_DAYS,
            insert_chunk_size: Self::DEFAULT_INSERT_CHUNK_SIZE,
            list_page_limit: Self::DEFAULT_LIST_PAGE_LIMIT,
            sweep_after_export: false,
        }
    }

    /// Set the retention horizon.
    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = days;
        self
    }

    /// Set the bulk-insert chunk size (clamped to at least 1).
    pub fn with_insert_chunk_size(mut self, size: usize) -> Self {
        self.insert_chunk_size = size.max(1);
        self
    }

    /// Set the listing page cap.
    pub fn with_list_page_limit(mut self, limit: usize) -> Self {
        self.list_page_limit = limit;
        self
    }

    /// Enable or disable the post-export retention sweep.
    pub fn with_sweep_after_export(mut self, enabled: bool) -> Self {
        self.sweep_after_export = enabled;
        self
    }

    /// Whether `table` is part of the configured set.
    pub fn is_configured(&self, table: &TableName) -> bool {
        self.tables.contains(table)
    }
}

/// Shared secret gating restore and explicit-delete requests.
///
/// The secret never appears in `Debug` output or log fields.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestoreSecret(String);

impl RestoreSecret {
    /// Wrap a secret value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Compare a candidate credential against the secret without
    /// short-circuiting on the first mismatched byte.
    pub fn verify(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let given = candidate.as_bytes();
        if expected.len() != given.len() {
            return false;
        }
        expected
            .iter()
            .zip(given)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl fmt::Debug for RestoreSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RestoreSecret(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(names: &[&str]) -> Vec<TableName> {
        names.iter().map(|n| TableName::parse(n).unwrap()).collect()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = VaultConfig::new(tables(&["items"]), RestoreSecret::new("s"));
        assert_eq!(config.retention_days, 15);
        assert_eq!(config.insert_chunk_size, 200);
        assert_eq!(config.list_page_limit, 100);
        assert!(!config.sweep_after_export);
    }

    #[test]
    fn chunk_size_is_clamped_to_one() {
        let config = VaultConfig::new(tables(&["items"]), RestoreSecret::new("s"))
            .with_insert_chunk_size(0);
        assert_eq!(config.insert_chunk_size, 1);
    }

    #[test]
    fn secret_verifies_exact_match_only() {
        let secret = RestoreSecret::new("hunter2");
        assert!(secret.verify("hunter2"));
        assert!(!secret.verify("hunter"));
        assert!(!secret.verify("hunter3"));
        assert!(!secret.verify(""));
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = RestoreSecret::new("hunter2");
        assert_eq!(format!("{secret:?}"), "RestoreSecret(***)");
    }
}
