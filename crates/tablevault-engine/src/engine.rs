//! The [BackupEngine] facade and archive management operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tablevault_core::{
    ARCHIVE_PREFIX, BlobStore, ProgressSlot, RecordStore, VaultConfig, naming,
};

use crate::error::{BackupError, BackupResult};
use crate::runlock::RunLock;

/// Orchestrates export, restore, and retention runs against one table set.
///
/// The engine holds the collaborators behind trait objects, the injected
/// [VaultConfig], the run lock, and one progress slot per run kind. It is
/// cheap to share behind an `Arc` since every operation takes `&self`.
pub struct BackupEngine {
    store: Arc<dyn RecordStore>,
    blob: Arc<dyn BlobStore>,
    config: VaultConfig,
    lock: RunLock,
    export_progress: ProgressSlot,
    restore_progress: ProgressSlot,
}

impl BackupEngine {
    /// Create an engine over the given collaborators.
    pub fn new(config: VaultConfig, store: Arc<dyn RecordStore>, blob: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            blob,
            config,
            lock: RunLock::new(),
            export_progress: ProgressSlot::new(),
            restore_progress: ProgressSlot::new(),
        }
    }

    /// The injected configuration.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Percent of the current (or most recent) export run, 0–100.
    pub fn export_progress(&self) -> u8 {
        self.export_progress.percent()
    }

    /// Percent of the current (or most recent) restore run, 0–100.
    pub fn restore_progress(&self) -> u8 {
        self.restore_progress.percent()
    }

    pub(crate) fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub(crate) fn blob(&self) -> &Arc<dyn BlobStore> {
        &self.blob
    }

    pub(crate) fn lock(&self) -> &RunLock {
        &self.lock
    }

    pub(crate) fn export_slot(&self) -> &ProgressSlot {
        &self.export_progress
    }

    pub(crate) fn restore_slot(&self) -> &ProgressSlot {
        &self.restore_progress
    }

    /// List stored archives, newest first.
    pub async fn list_archives(&self) -> BackupResult<Vec<ArchiveInfo>> {
        let items = self
            .blob
            .list(ARCHIVE_PREFIX, self.config.list_page_limit)
            .await?;

        let mut archives: Vec<ArchiveInfo> = items
            .into_iter()
            .map(|item| ArchiveInfo {
                size_display: format_size(item.size),
                local_time: item
                    .created_at
                    .with_timezone(&naming::karachi())
                    .format("%m/%d/%Y, %I:%M:%S %p")
                    .to_string(),
                name: item.name,
                created_at: item.created_at,
                size: item.size,
            })
            .collect();
        archives.sort_by(|a, b| b.name.cmp(&a.name));

        Ok(archives)
    }

    /// Fetch an archive artifact's bytes, e.g. for a download endpoint.
    pub async fn download_archive(&self, name: &str) -> BackupResult<Vec<u8>> {
        Ok(self.blob.download(name).await?)
    }

    /// Delete one archive by name; gated by the restore credential.
    pub async fn delete_archive(&self, name: &str, credential: &str) -> BackupResult<()> {
        if !self.config.restore_secret.verify(credential) {
            return Err(BackupError::Unauthorized);
        }

        let names = [name.to_string()];
        self.blob.delete(&names).await?;
        tracing::info!(archive = %name, "archive deleted on request");
        Ok(())
    }
}

/// One archive in a listing, with display-ready fields.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveInfo {
    /// Artifact name in the blob store.
    pub name: String,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Size in bytes.
    pub size: u64,
    /// Human-readable size (B / KB / MB).
    pub size_display: String,
    /// Creation time rendered in the Karachi offset for display.
    pub local_time: String,
}

/// Render a byte count as B / KB / MB.
pub fn format_size(bytes: u64) -> String {
    const MB: u64 = 1024 * 1024;
    const KB: u64 = 1024;
    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sizes_like_the_listing_expects() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
