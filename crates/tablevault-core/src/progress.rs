//! Per-run progress state with lock-free polling observers.
//!
//! Each pipeline run owns one [ProgressTracker]; observers poll a
//! [ProgressObserver] handle for a 0–100 integer percent. The percent is
//! monotone non-decreasing within a run, and the tracker never shares state
//! across runs: the engine installs a fresh observer into a [ProgressSlot]
//! at run start, which is what resets the visible percent to zero.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Progress state owned by one pipeline run.
///
/// `advance` bumps the completed-step count and publishes
/// `floor(completed / total * 100)`; `complete` forces 100. Publication uses
/// `fetch_max`, so the visible percent can never move backwards even if steps
/// race with a forced completion.
#[derive(Debug)]
pub struct ProgressTracker {
    total_steps: usize,
    completed: AtomicUsize,
    percent: Arc<AtomicU8>,
}

impl ProgressTracker {
    /// Create a tracker for a run of `total_steps` steps.
    pub fn new(total_steps: usize) -> Self {
        Self {
            total_steps,
            completed: AtomicUsize::new(0),
            percent: Arc::new(AtomicU8::new(0)),
        }
    }

    /// A read-only handle observers poll.
    pub fn observer(&self) -> ProgressObserver {
        ProgressObserver {
            percent: Arc::clone(&self.percent),
        }
    }

    /// Record one completed step.
    pub fn advance(&self) {
        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        let percent = if self.total_steps == 0 {
            100
        } else {
            ((completed.min(self.total_steps) * 100) / self.total_steps) as u8
        };
        self.percent.fetch_max(percent, Ordering::Relaxed);
    }

    /// Force the run to 100 percent.
    pub fn complete(&self) {
        self.percent.fetch_max(100, Ordering::Relaxed);
    }

    /// Current percent, 0–100.
    pub fn percent(&self) -> u8 {
        self.percent.load(Ordering::Relaxed)
    }
}

/// Read-only polling handle onto one run's progress.
#[derive(Debug, Clone)]
pub struct ProgressObserver {
    percent: Arc<AtomicU8>,
}

impl ProgressObserver {
    /// Current percent, 0–100.
    pub fn percent(&self) -> u8 {
        self.percent.load(Ordering::Relaxed)
    }
}

/// Holder for the current run's observer, one per run kind.
///
/// Polling an empty slot reads zero. After a run finishes its observer stays
/// installed, so late pollers still see the terminal percent until the next
/// run replaces it.
#[derive(Debug, Default)]
pub struct ProgressSlot {
    current: RwLock<Option<ProgressObserver>>,
}

impl ProgressSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the observer of a freshly started run.
    pub fn install(&self, observer: ProgressObserver) {
        let mut slot = self.current.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(observer);
    }

    /// Percent of the current (or most recent) run, 0 if none has started.
    pub fn percent(&self) -> u8 {
        let slot = self.current.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().map(ProgressObserver::percent).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_floors_fractional_steps() {
        // 8 steps: 6 tables + pack + upload.
        let tracker = ProgressTracker::new(8);
        tracker.advance();
        assert_eq!(tracker.percent(), 12);
        tracker.advance();
        assert_eq!(tracker.percent(), 25);
    }

    #[test]
    fn percent_is_monotone_and_ends_at_100() {
        let tracker = ProgressTracker::new(3);
        let observer = tracker.observer();
        let mut last = observer.percent();
        for _ in 0..3 {
            tracker.advance();
            let now = observer.percent();
            assert!(now >= last);
            last = now;
        }
        tracker.complete();
        assert_eq!(observer.percent(), 100);
    }

    #[test]
    fn complete_never_moves_percent_backwards() {
        let tracker = ProgressTracker::new(2);
        tracker.advance();
        tracker.advance();
        assert_eq!(tracker.percent(), 100);
        tracker.advance();
        assert_eq!(tracker.percent(), 100);
    }

    #[test]
    fn zero_step_run_completes_immediately_on_advance() {
        let tracker = ProgressTracker::new(0);
        tracker.advance();
        assert_eq!(tracker.percent(), 100);
    }

    #[test]
    fn empty_slot_reads_zero_and_new_run_resets() {
        let slot = ProgressSlot::new();
        assert_eq!(slot.percent(), 0);

        let first = ProgressTracker::new(1);
        slot.install(first.observer());
        first.advance();
        assert_eq!(slot.percent(), 100);

        let second = ProgressTracker::new(4);
        slot.install(second.observer());
        assert_eq!(slot.percent(), 0);
    }
}
