//! The export pipeline: tables → codec → archive → upload.

use chrono::Utc;
use tablevault_core::{ArchiveName, ProgressTracker, codec, naming};

use crate::archive;
use crate::engine::BackupEngine;
use crate::error::BackupResult;
use crate::outcome::{ExportOutcome, SkippedTable};
use crate::runlock::RunKind;

/// MIME type the packed artifact is uploaded under.
const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

impl BackupEngine {
    /// Export every configured table into one archive and upload it.
    ///
    /// Tables are processed sequentially in configured order; a table whose
    /// fetch fails is logged and skipped (absent from the archive), never
    /// fatal to the run. Progress counts one step per table plus the pack
    /// and upload steps, reaching 100 once the upload lands.
    ///
    /// The scratch directory holding staged members and the packed artifact
    /// is removed on every exit path.
    pub async fn export(&self) -> BackupResult<ExportOutcome> {
        let _guard = self.lock().try_acquire(RunKind::Export)?;

        let name = ArchiveName::generate(Utc::now());
        let total_steps = self.config().tables.len() + 2;
        let tracker = ProgressTracker::new(total_steps);
        self.export_slot().install(tracker.observer());

        let scratch = tempfile::Builder::new()
            .prefix("tablevault-export-")
            .tempdir()?;

        tracing::info!(archive = %name, tables = self.config().tables.len(), "export started");

        let mut staged = Vec::new();
        let mut exported = Vec::new();
        let mut skipped = Vec::new();

        for table in &self.config().tables {
            match self.store().select_all(table).await {
                Ok(records) => {
                    let text = codec::encode(&records);
                    let path = scratch.path().join(naming::member_name(table));
                    tokio::fs::write(&path, text).await?;
                    tracing::info!(table = %table, rows = records.len(), "table staged");
                    staged.push(path);
                    exported.push(table.clone());
                    tracker.advance();
                }
                Err(e) => {
                    tracing::warn!(table = %table, error = %e, "table skipped: fetch failed");
                    skipped.push(SkippedTable {
                        table: table.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let zip_path = scratch.path().join(name.artifact());
        archive::pack(&staged, &zip_path)?;
        tracker.advance();

        let bytes = tokio::fs::read(&zip_path).await?;
        let size = bytes.len();
        self.blob()
            .upload(&name.artifact(), bytes, ARCHIVE_CONTENT_TYPE, true)
            .await?;
        tracker.complete();

        tracing::info!(
            archive = %name,
            size_bytes = size,
            exported = exported.len(),
            skipped = skipped.len(),
            "export completed"
        );

        if self.config().sweep_after_export {
            if let Err(e) = self.sweep().await {
                tracing::warn!(error = %e, "post-export retention sweep failed");
            }
        }

        Ok(ExportOutcome {
            archive: name,
            exported,
            skipped,
        })
    }
}
