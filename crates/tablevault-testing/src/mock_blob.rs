//! Mock blob store with adjustable object timestamps and scripted failures.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tablevault_core::{BlobError, BlobItem, BlobStore};

/// One recorded call against the mock blob store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobCall {
    Upload { name: String, content_type: String },
    Download(String),
    List { prefix: String, limit: usize },
    Delete(Vec<String>),
}

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    created_at: DateTime<Utc>,
}

/// In-memory [BlobStore] for tests.
///
/// Objects can be seeded with explicit creation times (`with_object_aged`),
/// which is how retention-boundary tests place archives on either side of the
/// horizon.
#[derive(Debug, Clone, Default)]
pub struct MockBlobStore {
    objects: Arc<Mutex<BTreeMap<String, StoredObject>>>,
    delete_failures: Arc<Mutex<HashSet<String>>>,
    download_failures: Arc<Mutex<HashSet<String>>>,
    fail_uploads: Arc<Mutex<bool>>,
    calls: Arc<Mutex<Vec<BlobCall>>>,
}

impl MockBlobStore {
    /// Create an empty mock blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object created now.
    pub fn with_object(self, name: &str, bytes: Vec<u8>) -> Self {
        self.with_object_aged(name, bytes, Utc::now())
    }

    /// Seed an object with an explicit creation time.
    pub fn with_object_aged(self, name: &str, bytes: Vec<u8>, created_at: DateTime<Utc>) -> Self {
        self.objects.lock().unwrap().insert(
            name.to_string(),
            StoredObject { bytes, created_at },
        );
        self
    }

    /// Make deleting the named object fail.
    pub fn with_delete_failure(self, name: &str) -> Self {
        self.delete_failures.lock().unwrap().insert(name.to_string());
        self
    }

    /// Make downloading the named object fail even if it exists.
    pub fn with_download_failure(self, name: &str) -> Self {
        self.download_failures.lock().unwrap().insert(name.to_string());
        self
    }

    /// Make every upload fail.
    pub fn with_failing_uploads(self) -> Self {
        *self.fail_uploads.lock().unwrap() = true;
        self
    }

    /// Names of all stored objects, sorted.
    pub fn object_names(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    /// Bytes of the named object, if present.
    pub fn object(&self, name: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(name)
            .map(|o| o.bytes.clone())
    }

    /// Every call issued against the blob store, in order.
    pub fn calls(&self) -> Vec<BlobCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Total number of calls issued against the blob store.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn log(&self, call: BlobCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn upload(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> Result<(), BlobError> {
        self.log(BlobCall::Upload {
            name: name.to_string(),
            content_type: content_type.to_string(),
        });

        if *self.fail_uploads.lock().unwrap() {
            return Err(BlobError::UploadFailed {
                name: name.to_string(),
                message: "scripted upload failure".to_string(),
            });
        }

        let mut objects = self.objects.lock().unwrap();
        if !overwrite && objects.contains_key(name) {
            return Err(BlobError::AlreadyExists(name.to_string()));
        }

        objects.insert(
            name.to_string(),
            StoredObject {
                bytes,
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn download(&self, name: &str) -> Result<Vec<u8>, BlobError> {
        self.log(BlobCall::Download(name.to_string()));

        if self.download_failures.lock().unwrap().contains(name) {
            return Err(BlobError::DownloadFailed {
                name: name.to_string(),
                message: "scripted download failure".to_string(),
            });
        }

        self.object(name)
            .ok_or_else(|| BlobError::NotFound(name.to_string()))
    }

    async fn list(&self, prefix: &str, limit: usize) -> Result<Vec<BlobItem>, BlobError> {
        self.log(BlobCall::List {
            prefix: prefix.to_string(),
            limit,
        });

        let objects = self.objects.lock().unwrap();
        Ok(objects
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .take(limit)
            .map(|(name, object)| BlobItem {
                name: name.clone(),
                created_at: object.created_at,
                size: object.bytes.len() as u64,
            })
            .collect())
    }

    async fn delete(&self, names: &[String]) -> Result<(), BlobError> {
        self.log(BlobCall::Delete(names.to_vec()));

        let failures = self.delete_failures.lock().unwrap();
        for name in names {
            if failures.contains(name) {
                return Err(BlobError::DeleteFailed {
                    name: name.clone(),
                    message: "scripted delete failure".to_string(),
                });
            }
        }
        drop(failures);

        let mut objects = self.objects.lock().unwrap();
        for name in names {
            objects.remove(name);
        }
        Ok(())
    }
}
