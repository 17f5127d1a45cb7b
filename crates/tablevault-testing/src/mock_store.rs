//! Mock record store with scripted failures and a call history.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tablevault_core::{Record, RecordStore, StoreError, TableName};

/// One recorded call against the mock store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    SelectAll(String),
    DeleteAll(String),
    InsertMany { table: String, rows: usize },
}

/// In-memory [RecordStore] for tests.
///
/// Seed tables with `with_table`, script failures per table and operation,
/// and inspect `calls()` / `records()` afterwards.
#[derive(Debug, Clone, Default)]
pub struct MockRecordStore {
    tables: Arc<Mutex<HashMap<String, Vec<Record>>>>,
    select_failures: Arc<Mutex<HashSet<String>>>,
    delete_failures: Arc<Mutex<HashSet<String>>>,
    insert_failures: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<StoreCall>>>,
}

impl MockRecordStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with records.
    pub fn with_table(self, table: &str, records: Vec<Record>) -> Self {
        self.tables
            .lock()
            .unwrap()
            .insert(table.to_string(), records);
        self
    }

    /// Make `select_all` fail for the given table.
    pub fn with_select_failure(self, table: &str) -> Self {
        self.select_failures.lock().unwrap().insert(table.to_string());
        self
    }

    /// Make `delete_all` fail for the given table.
    pub fn with_delete_failure(self, table: &str) -> Self {
        self.delete_failures.lock().unwrap().insert(table.to_string());
        self
    }

    /// Make `insert_many` fail for the given table.
    pub fn with_insert_failure(self, table: &str) -> Self {
        self.insert_failures.lock().unwrap().insert(table.to_string());
        self
    }

    /// Current contents of a table.
    pub fn records(&self, table: &str) -> Vec<Record> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Every call issued against the store, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Total number of calls issued against the store.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn log(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn select_all(&self, table: &TableName) -> Result<Vec<Record>, StoreError> {
        self.log(StoreCall::SelectAll(table.to_string()));

        if self.select_failures.lock().unwrap().contains(table.as_str()) {
            return Err(StoreError::SelectFailed {
                table: table.to_string(),
                message: "scripted select failure".to_string(),
            });
        }

        Ok(self.records(table.as_str()))
    }

    async fn delete_all(&self, table: &TableName) -> Result<(), StoreError> {
        self.log(StoreCall::DeleteAll(table.to_string()));

        if self.delete_failures.lock().unwrap().contains(table.as_str()) {
            return Err(StoreError::DeleteFailed {
                table: table.to_string(),
                message: "scripted delete failure".to_string(),
            });
        }

        self.tables
            .lock()
            .unwrap()
            .insert(table.to_string(), Vec::new());
        Ok(())
    }

    async fn insert_many(&self, table: &TableName, records: &[Record]) -> Result<(), StoreError> {
        self.log(StoreCall::InsertMany {
            table: table.to_string(),
            rows: records.len(),
        });

        if self.insert_failures.lock().unwrap().contains(table.as_str()) {
            return Err(StoreError::InsertFailed {
                table: table.to_string(),
                message: "scripted insert failure".to_string(),
            });
        }

        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .extend_from_slice(records);
        Ok(())
    }
}
