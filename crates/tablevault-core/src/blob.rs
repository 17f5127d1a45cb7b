//! The blob-store collaborator seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the blob store collaborator.
#[derive(Error, Debug, Clone)]
pub enum BlobError {
    /// The named object does not exist.
    #[error("object not found: {0}")]
    NotFound(String),

    /// An object with the same name already exists and overwrite was off.
    #[error("object already exists: {0}")]
    AlreadyExists(String),

    /// An upload failed.
    #[error("upload failed for '{name}': {message}")]
    UploadFailed { name: String, message: String },

    /// A download failed.
    #[error("download failed for '{name}': {message}")]
    DownloadFailed { name: String, message: String },

    /// A listing failed.
    #[error("list failed: {0}")]
    ListFailed(String),

    /// A delete failed.
    #[error("delete failed for '{name}': {message}")]
    DeleteFailed { name: String, message: String },
}

/// One entry of a blob-store listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobItem {
    /// Object name within the bucket.
    pub name: String,
    /// Creation time of the object.
    pub created_at: DateTime<Utc>,
    /// Object size in bytes.
    pub size: u64,
}

/// Named-object storage scoped to one bucket.
///
/// The bucket itself is the implementation's concern; every name here is
/// relative to it. The destination namespace is flat: listings do not recurse
/// and paginate only via the `limit` cap.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload `bytes` under `name`. With `overwrite` off, uploading over an
    /// existing object is an error.
    async fn upload(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> Result<(), BlobError>;

    /// Download the object named `name`.
    async fn download(&self, name: &str) -> Result<Vec<u8>, BlobError>;

    /// List up to `limit` objects whose names start with `prefix`.
    async fn list(&self, prefix: &str, limit: usize) -> Result<Vec<BlobItem>, BlobError>;

    /// Delete the named objects.
    async fn delete(&self, names: &[String]) -> Result<(), BlobError>;
}
