//! # Tablevault Engine
//!
//! Backup/restore orchestration for a fixed set of named tables.
//!
//! The engine snapshots every configured table into one compressed archive
//! (`backup_<timestamp>.zip` of `<table>.csv` members), uploads it to the blob
//! store, prunes archives past the retention horizon, and reconstitutes
//! tables from an archive, fully or table-by-table, with per-table failure
//! containment.
//!
//! The persistent store and the blob store are collaborator traits
//! ([tablevault_core::RecordStore], [tablevault_core::BlobStore]); the engine
//! owns only the orchestration:
//!
//! - **[BackupEngine::export]**: table to records to codec to archive to upload
//! - **[BackupEngine::restore]**: download, unpack, decode, replace each table
//! - **[BackupEngine::sweep]**: delete archives older than the horizon
//! - archive management: list, download, credential-gated delete
//!
//! Each run is one sequential pipeline; a run lock per run kind rejects
//! overlapping runs, and per-run progress is pollable via
//! [BackupEngine::export_progress] / [BackupEngine::restore_progress].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tablevault_core::{RestoreSecret, TableName, VaultConfig};
//! use tablevault_engine::{BackupEngine, RestoreMode, RestoreRequest};
//! # use tablevault_core::{BlobStore, RecordStore};
//!
//! # async fn example(store: Arc<dyn RecordStore>, blob: Arc<dyn BlobStore>)
//! # -> Result<(), Box<dyn std::error::Error>> {
//! let config = VaultConfig::new(
//!     vec![TableName::parse("sales")?, TableName::parse("items")?],
//!     RestoreSecret::new("secret"),
//! );
//! let engine = BackupEngine::new(config, store, blob);
//!
//! let outcome = engine.export().await?;
//! println!("uploaded {}", outcome.archive);
//!
//! engine
//!     .restore(RestoreRequest {
//!         credential: "secret".into(),
//!         archive: outcome.archive.artifact(),
//!         mode: RestoreMode::Full,
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod runlock;

mod export;
mod restore;
mod retention;

pub use engine::{ArchiveInfo, BackupEngine, format_size};
pub use error::{ArchiveError, BackupError, BackupResult};
pub use outcome::{
    ExportOutcome, RestoreOutcome, SkippedTable, SweepOutcome, TableOutcome, TableReport,
};
pub use restore::{RestoreMode, RestoreRequest};
pub use runlock::{RunGuard, RunKind, RunLock};
