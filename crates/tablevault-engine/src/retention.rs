//! The retention sweeper.

use chrono::{DateTime, Duration, Utc};
use tablevault_core::ARCHIVE_PREFIX;

use crate::engine::BackupEngine;
use crate::error::BackupResult;
use crate::outcome::SweepOutcome;

impl BackupEngine {
    /// Delete every stored archive strictly older than the retention horizon.
    ///
    /// An archive aged exactly the horizon is kept. Per-item delete failures
    /// are logged and the sweep continues with the remaining items; only a
    /// failed listing aborts the sweep. Valid both appended to a successful
    /// export and on its own schedule.
    pub async fn sweep(&self) -> BackupResult<SweepOutcome> {
        self.sweep_at(Utc::now()).await
    }

    /// [BackupEngine::sweep] with an explicit reference instant.
    ///
    /// The horizon is measured against `now` rather than the wall clock, so
    /// the exact-boundary case is deterministic for callers that pin time.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> BackupResult<SweepOutcome> {
        let cutoff = now - Duration::days(i64::from(self.config().retention_days));
        let items = self
            .blob()
            .list(ARCHIVE_PREFIX, self.config().list_page_limit)
            .await?;

        let mut outcome = SweepOutcome {
            examined: items.len(),
            ..SweepOutcome::default()
        };

        for item in items {
            if item.created_at >= cutoff {
                continue;
            }

            let names = [item.name.clone()];
            match self.blob().delete(&names).await {
                Ok(()) => {
                    tracing::info!(archive = %item.name, created_at = %item.created_at, "expired archive deleted");
                    outcome.deleted.push(item.name);
                }
                Err(e) => {
                    tracing::warn!(archive = %item.name, error = %e, "expired archive delete failed, continuing");
                    outcome.failed.push(item.name);
                }
            }
        }

        tracing::info!(
            examined = outcome.examined,
            deleted = outcome.deleted.len(),
            failed = outcome.failed.len(),
            "retention sweep finished"
        );

        Ok(outcome)
    }
}
