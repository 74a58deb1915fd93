use crate::RunnerError;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Counters and accepted-result buffer shared by every worker of a coordinator.
#[derive(Debug, Default)]
pub struct RunStats {
    active: AtomicBool,
    run_open: AtomicBool,
    accepted: AtomicUsize,
    rejected: AtomicUsize,
    exhausted: AtomicUsize,
    skipped: AtomicUsize,
    total_checked: AtomicUsize,
    accepted_lines: Mutex<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub active: bool,
    pub accepted: usize,
    pub rejected: usize,
    pub exhausted: usize,
    pub skipped: usize,
    pub total_checked: usize,
    pub buffered: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn is_run_open(&self) -> bool {
        self.run_open.load(Ordering::SeqCst)
    }

    pub fn begin_run(&self) -> Result<(), RunnerError> {
        self.run_open
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| RunnerError::RunActive)?;
        self.active.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Closes the open run and hands back the buffered lines.
    ///
    /// Only the first caller after `begin_run` receives `Some`.
    pub fn finish_run(&self) -> Option<Vec<String>> {
        if self
            .run_open
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return None;
        }
        self.active.store(false, Ordering::SeqCst);
        Some(std::mem::take(&mut *self.lines()))
    }

    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn reset(&self) -> Result<(), RunnerError> {
        if self.is_run_open() {
            return Err(RunnerError::RunActive);
        }
        self.accepted.store(0, Ordering::SeqCst);
        self.rejected.store(0, Ordering::SeqCst);
        self.exhausted.store(0, Ordering::SeqCst);
        self.skipped.store(0, Ordering::SeqCst);
        self.total_checked.store(0, Ordering::SeqCst);
        self.lines().clear();
        Ok(())
    }

    pub fn record_accepted(&self, line: String) {
        self.lines().push(line);
        self.accepted.fetch_add(1, Ordering::SeqCst);
        self.total_checked.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::SeqCst);
        self.total_checked.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_exhausted(&self) {
        self.exhausted.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            active: self.is_active(),
            accepted: self.accepted.load(Ordering::SeqCst),
            rejected: self.rejected.load(Ordering::SeqCst),
            exhausted: self.exhausted.load(Ordering::SeqCst),
            skipped: self.skipped.load(Ordering::SeqCst),
            total_checked: self.total_checked.load(Ordering::SeqCst),
            buffered: self.lines().len(),
        }
    }

    fn lines(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // a worker panicking mid-push leaves the Vec itself intact
        self.accepted_lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_records_are_not_lost() {
        let stats = Arc::new(RunStats::new());
        let workers = 8;

        let handles: Vec<_> = (0..workers)
            .map(|w| {
                let stats = stats.clone();
                tokio::spawn(async move {
                    for i in 0..100 {
                        stats.record_accepted(format!("w{w}-{i}"));
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.accepted, 100 * workers);
        assert_eq!(snapshot.total_checked, 100 * workers);

        stats.begin_run().unwrap();
        let lines = stats.finish_run().unwrap();
        let unique: HashSet<_> = lines.iter().collect();
        assert_eq!(lines.len(), 100 * workers);
        assert_eq!(unique.len(), 100 * workers);
    }

    #[test]
    fn test_finish_run_only_once() {
        let stats = RunStats::new();
        assert!(stats.finish_run().is_none());

        stats.begin_run().unwrap();
        stats.record_accepted("x - 1".to_string());
        assert!(stats.begin_run().is_err());

        assert_eq!(stats.finish_run(), Some(vec!["x - 1".to_string()]));
        assert!(stats.finish_run().is_none());
        assert!(!stats.is_active());
    }

    #[test]
    fn test_reset_refused_while_run_open() {
        let stats = RunStats::new();
        stats.record_rejected();
        stats.record_skipped();
        stats.begin_run().unwrap();
        stats.stop();
        assert!(matches!(stats.reset(), Err(RunnerError::RunActive)));

        stats.finish_run();
        stats.reset().unwrap();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }
}
