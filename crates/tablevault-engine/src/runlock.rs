//! Run lock: at most one in-flight run per run kind.
//!
//! Concurrent runs of the same kind would race on progress state and collide
//! on same-second archive names, so the engine rejects them outright instead
//! of queueing. Export and restore are separate kinds and may overlap.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::BackupError;

/// The two kinds of pipeline run the lock distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunKind {
    /// An export (backup) run.
    Export,
    /// A restore run.
    Restore,
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Export => f.write_str("export"),
            Self::Restore => f.write_str("restore"),
        }
    }
}

/// Tracks which run kinds are currently active.
#[derive(Debug, Default, Clone)]
pub struct RunLock {
    active: Arc<Mutex<HashSet<RunKind>>>,
}

impl RunLock {
    /// Create a lock with no active runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to begin a run of `kind`.
    ///
    /// Returns a guard that marks the run finished on drop, or
    /// [BackupError::RunInProgress] if a run of the same kind is active.
    pub fn try_acquire(&self, kind: RunKind) -> Result<RunGuard, BackupError> {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if !active.insert(kind) {
            return Err(BackupError::RunInProgress { kind });
        }
        Ok(RunGuard {
            kind,
            active: Arc::clone(&self.active),
        })
    }

    /// Whether a run of `kind` is currently active.
    pub fn is_active(&self, kind: RunKind) -> bool {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&kind)
    }
}

/// Marker for one active run; releases the kind on drop.
#[derive(Debug)]
pub struct RunGuard {
    kind: RunKind,
    active: Arc<Mutex<HashSet<RunKind>>>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_run_of_same_kind_is_rejected() {
        let lock = RunLock::new();
        let _guard = lock.try_acquire(RunKind::Export).unwrap();
        assert!(matches!(
            lock.try_acquire(RunKind::Export),
            Err(BackupError::RunInProgress {
                kind: RunKind::Export
            })
        ));
    }

    #[test]
    fn different_kinds_may_overlap() {
        let lock = RunLock::new();
        let _export = lock.try_acquire(RunKind::Export).unwrap();
        assert!(lock.try_acquire(RunKind::Restore).is_ok());
    }

    #[test]
    fn dropping_the_guard_releases_the_kind() {
        let lock = RunLock::new();
        {
            let _guard = lock.try_acquire(RunKind::Restore).unwrap();
            assert!(lock.is_active(RunKind::Restore));
        }
        assert!(!lock.is_active(RunKind::Restore));
        assert!(lock.try_acquire(RunKind::Restore).is_ok());
    }
}
