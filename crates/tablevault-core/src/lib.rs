//! # Tablevault Core
//!
//! Core types and collaborator seams for the tablevault backup/restore engine.
//!
//! This crate holds everything the pipelines in `tablevault-engine` are built
//! from but that carries no I/O of its own:
//!
//! - **[Record]** and the **tabular codec** ([codec::encode] / [codec::decode]):
//!   the flat header+quoted-CSV text format table extracts are stored in
//! - **[TableName]** / **[ArchiveName]**: validated identifiers and the
//!   deterministic timestamp-based naming policy
//! - **[VaultConfig]**: the single configuration value (ordered table set,
//!   retention horizon, chunk size, restore secret) injected into the pipelines
//! - **[ProgressTracker]** / **[ProgressObserver]**: per-run progress state
//!   with lock-free polling observers
//! - **[RecordStore]** / **[BlobStore]**: the async traits the persistent
//!   store and blob store collaborators implement
//!
//! ## Example
//!
//! ```rust
//! use tablevault_core::codec;
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"id": "1", "name": "bolt"}).as_object().cloned().unwrap(),
//! ];
//! let text = codec::encode(&records);
//! assert_eq!(text, "id,name\n\"1\",\"bolt\"");
//! assert_eq!(codec::decode(&text), records);
//! ```

pub mod blob;
pub mod codec;
pub mod config;
pub mod naming;
pub mod progress;
pub mod record;
pub mod store;
pub mod table;

pub use blob::{BlobError, BlobItem, BlobStore};
pub use config::{RestoreSecret, VaultConfig};
pub use naming::{ARCHIVE_PREFIX, ArchiveName, ArchiveNameError};
pub use progress::{ProgressObserver, ProgressSlot, ProgressTracker};
pub use record::Record;
pub use store::{RecordStore, StoreError};
pub use table::{InvalidTableName, TableName};
