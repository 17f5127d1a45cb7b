//! # Tablevault Testing
//!
//! Mock collaborator implementations for exercising the tablevault pipelines
//! without a real record store or blob store.
//!
//! Both mocks are builder-configured with seed data and scripted failures,
//! and record every call so tests can assert exactly which collaborator I/O a
//! pipeline issued (or that none was issued at all).

mod mock_blob;
mod mock_store;

pub use mock_blob::{BlobCall, MockBlobStore};
pub use mock_store::{MockRecordStore, StoreCall};

use tablevault_core::Record;

/// Build a [Record] from column/value pairs, preserving pair order.
///
/// ```
/// use tablevault_testing::record;
/// use serde_json::json;
///
/// let r = record(&[("id", json!("1")), ("name", json!("bolt"))]);
/// assert_eq!(r.keys().collect::<Vec<_>>(), ["id", "name"]);
/// ```
pub fn record(pairs: &[(&str, serde_json::Value)]) -> Record {
    let mut record = Record::new();
    for (column, value) in pairs {
        record.insert((*column).to_string(), value.clone());
    }
    record
}
