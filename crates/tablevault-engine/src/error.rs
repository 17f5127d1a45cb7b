//! Error types for pipeline runs.

use tablevault_core::{BlobError, StoreError, TableName};
use thiserror::Error;

use crate::runlock::RunKind;

/// Result type for engine operations.
pub type BackupResult<T> = Result<T, BackupError>;

/// Errors that can occur inside the archive packer/unpacker.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Filesystem I/O on scratch files failed.
    #[error("archive I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The zip container is malformed or could not be written.
    #[error("zip container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A requested member is absent from the archive.
    #[error("member '{member}' not found in archive")]
    MemberMissing { member: String },

    /// An entry name would escape the extraction directory.
    #[error("unsafe archive entry name: '{entry}'")]
    UnsafeEntryName { entry: String },
}

/// Top-level error for export, restore, and sweep runs.
///
/// Every internal fault is translated into one of these before it crosses the
/// pipeline boundary: callers always see a structured outcome, never a panic.
#[derive(Error, Debug)]
pub enum BackupError {
    /// A run of the same kind is already in flight.
    #[error("a {kind} run is already in progress")]
    RunInProgress { kind: RunKind },

    /// The request credential does not match the configured secret.
    #[error("restore credential rejected")]
    Unauthorized,

    /// The requested table is not in the configured table set.
    #[error("table '{table}' is not configured")]
    TableNotConfigured { table: String },

    /// A record store call failed outside the per-table restore step.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A blob store call failed.
    #[error(transparent)]
    Blob(#[from] BlobError),

    /// Packing or unpacking the archive failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Replacing one table's contents failed during restore.
    ///
    /// `left_empty` is true when the delete step had already succeeded, so
    /// the table no longer holds its previous contents; operators should
    /// re-run a single-table restore for it.
    #[error("restore failed for table '{table}' (left empty: {left_empty}): {source}")]
    TableRestoreFailed {
        table: TableName,
        left_empty: bool,
        #[source]
        source: StoreError,
    },

    /// Scratch-workspace I/O failed.
    #[error("scratch workspace I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
