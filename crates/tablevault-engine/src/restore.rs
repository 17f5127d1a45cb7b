//! The restore pipeline: download → unpack → codec → table replacement.

use serde::{Deserialize, Serialize};
use tablevault_core::{ProgressTracker, TableName, codec, naming};

use crate::archive;
use crate::engine::BackupEngine;
use crate::error::{ArchiveError, BackupError, BackupResult};
use crate::outcome::{RestoreOutcome, TableOutcome, TableReport};
use crate::runlock::RunKind;

/// Which tables a restore run covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestoreMode {
    /// Restore every configured table present in the archive.
    Full,
    /// Restore exactly one table; its member must exist in the archive.
    SingleTable(TableName),
}

/// A restore request as handed over by the HTTP glue.
#[derive(Debug, Clone, Deserialize)]
pub struct RestoreRequest {
    /// Credential checked against the configured restore secret.
    pub credential: String,
    /// Artifact name to restore from (e.g. `backup_2024-03-02_02-00-30.zip`).
    pub archive: String,
    /// Full-set or single-table restore.
    pub mode: RestoreMode,
}

impl BackupEngine {
    /// Restore tables from a stored archive.
    ///
    /// The credential is verified before any collaborator I/O. Per table the
    /// pipeline decodes the member, deletes the table's existing records, and
    /// bulk-inserts the decoded ones in chunks. A store failure during delete
    /// or insert is fatal for the run: the error names the failed table and
    /// whether it was left empty, and remaining tables are not touched.
    /// Delete-then-insert is not transactional, so continuing would silently
    /// leave multiple tables inconsistent.
    ///
    /// In [RestoreMode::Full], tables without a member in the archive are
    /// skipped; in [RestoreMode::SingleTable] an absent member is an error.
    pub async fn restore(&self, request: RestoreRequest) -> BackupResult<RestoreOutcome> {
        if !self.config().restore_secret.verify(&request.credential) {
            tracing::warn!(archive = %request.archive, "restore rejected: bad credential");
            return Err(BackupError::Unauthorized);
        }

        let _guard = self.lock().try_acquire(RunKind::Restore)?;

        let working: Vec<TableName> = match &request.mode {
            RestoreMode::Full => self.config().tables.clone(),
            RestoreMode::SingleTable(table) => {
                if !self.config().is_configured(table) {
                    return Err(BackupError::TableNotConfigured {
                        table: table.to_string(),
                    });
                }
                vec![table.clone()]
            }
        };

        let tracker = ProgressTracker::new(working.len());
        self.restore_slot().install(tracker.observer());

        let scratch = tempfile::Builder::new()
            .prefix("tablevault-restore-")
            .tempdir()?;

        tracing::info!(archive = %request.archive, tables = working.len(), "restore started");

        let bytes = self.blob().download(&request.archive).await?;
        archive::unpack(&bytes, scratch.path())?;

        let single = matches!(request.mode, RestoreMode::SingleTable(_));
        let mut reports = Vec::new();

        for table in &working {
            let member = naming::member_name(table);
            let path = scratch.path().join(&member);

            if !path.is_file() {
                if single {
                    return Err(ArchiveError::MemberMissing { member }.into());
                }
                tracing::warn!(table = %table, "no member in archive, table untouched");
                reports.push(TableReport {
                    table: table.clone(),
                    outcome: TableOutcome::Skipped,
                });
                tracker.advance();
                continue;
            }

            let rows = self.replace_table(table, &path).await?;
            reports.push(TableReport {
                table: table.clone(),
                outcome: TableOutcome::Restored { rows },
            });
            tracker.advance();
        }

        tracker.complete();
        tracing::info!(archive = %request.archive, tables = reports.len(), "restore completed");

        Ok(RestoreOutcome {
            archive: request.archive,
            tables: reports,
        })
    }

    /// Replace one table's contents with its decoded member.
    async fn replace_table(
        &self,
        table: &TableName,
        member_path: &std::path::Path,
    ) -> BackupResult<usize> {
        let text = tokio::fs::read_to_string(member_path).await?;
        let records = codec::decode(&text);

        self.store()
            .delete_all(table)
            .await
            .map_err(|e| BackupError::TableRestoreFailed {
                table: table.clone(),
                left_empty: false,
                source: e,
            })?;

        for chunk in records.chunks(self.config().insert_chunk_size.max(1)) {
            self.store()
                .insert_many(table, chunk)
                .await
                .map_err(|e| BackupError::TableRestoreFailed {
                    table: table.clone(),
                    left_empty: true,
                    source: e,
                })?;
        }

        tracing::info!(table = %table, rows = records.len(), "table restored");
        Ok(records.len())
    }
}
