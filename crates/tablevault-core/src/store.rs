//! The persistent-store collaborator seam.

use crate::record::Record;
use crate::table::TableName;
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by the record store collaborator.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// A select query failed.
    #[error("select failed for table '{table}': {message}")]
    SelectFailed { table: String, message: String },

    /// A bulk delete failed.
    #[error("delete failed for table '{table}': {message}")]
    DeleteFailed { table: String, message: String },

    /// A bulk insert failed.
    #[error("insert failed for table '{table}': {message}")]
    InsertFailed { table: String, message: String },

    /// The store is unreachable or rejected the connection.
    #[error("store connection failed: {0}")]
    ConnectionFailed(String),
}

/// Generic record store reachable by table name.
///
/// Implementations wrap whatever persistent store the deployment uses; the
/// pipelines only need full-table reads, match-everything deletes, and bulk
/// inserts. Insert payload limits are the caller's concern: the restore
/// pipeline chunks its inserts before calling [RecordStore::insert_many].
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every record of `table`.
    async fn select_all(&self, table: &TableName) -> Result<Vec<Record>, StoreError>;

    /// Delete every record of `table`.
    async fn delete_all(&self, table: &TableName) -> Result<(), StoreError>;

    /// Insert `records` into `table` in one call.
    async fn insert_many(&self, table: &TableName, records: &[Record]) -> Result<(), StoreError>;
}
