//! Structured run outcomes.

use serde::Serialize;
use tablevault_core::{ArchiveName, TableName};

/// Outcome of a completed export run.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    /// Name the archive was uploaded under.
    pub archive: ArchiveName,
    /// Tables whose members made it into the archive, in pipeline order.
    pub exported: Vec<TableName>,
    /// Tables skipped because their fetch failed (absent from the archive).
    pub skipped: Vec<SkippedTable>,
}

/// One table skipped during export, with the store's reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedTable {
    pub table: TableName,
    pub reason: String,
}

/// Outcome of a completed restore run.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreOutcome {
    /// The archive the restore ran from.
    pub archive: String,
    /// Per-table detail, in processing order.
    pub tables: Vec<TableReport>,
}

/// Per-table detail of a restore run.
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub table: TableName,
    pub outcome: TableOutcome,
}

/// What happened to one table during restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TableOutcome {
    /// Contents were replaced with the archive member's records.
    Restored { rows: usize },
    /// The archive carried no member for this table; left untouched.
    Skipped,
}

/// Outcome of a retention sweep.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepOutcome {
    /// Archives the listing returned.
    pub examined: usize,
    /// Archives past the horizon that were deleted.
    pub deleted: Vec<String>,
    /// Archives past the horizon whose delete failed (sweep continued).
    pub failed: Vec<String>,
}
