use crate::{
    check_worker_count, split_into_shards, Config, LineFilter, LineJob, Metrics, ResultSink,
    RunStats, RunnerError, ShardWorker, StatsSnapshot,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: StatsSnapshot,
    pub result_path: Option<PathBuf>,
}

/// Splits input across a worker pool and finalizes each run exactly once.
pub struct RunCoordinator {
    config: Config,
    job: Arc<dyn LineJob>,
    sink: Arc<dyn ResultSink>,
    stats: Arc<RunStats>,
    metrics: Arc<Metrics>,
    supervisor: Mutex<Option<JoinHandle<Option<PathBuf>>>>,
}

impl RunCoordinator {
    pub fn new(config: Config, job: Arc<dyn LineJob>, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            config,
            job,
            sink,
            stats: Arc::new(RunStats::new()),
            metrics: Arc::new(Metrics::new()),
            supervisor: Mutex::new(None),
        }
    }

    pub fn start_run(&self, lines: Vec<String>, worker_count: usize) -> Result<(), RunnerError> {
        check_worker_count(worker_count)?;
        self.stats.begin_run()?;

        let shards = split_into_shards(&lines, worker_count);
        info!(
            "Starting run over {} lines with {} workers",
            lines.len(),
            worker_count
        );

        let mut workers = JoinSet::new();
        for (id, shard) in shards.into_iter().enumerate() {
            if shard.is_empty() {
                continue;
            }
            let worker = ShardWorker::new(
                id,
                self.job.clone(),
                self.stats.clone(),
                self.metrics.clone(),
                LineFilter::new(self.config.min_line_length),
                self.config.retry.clone(),
            );
            workers.spawn(worker.run(shard));
        }

        let stats = self.stats.clone();
        let sink = self.sink.clone();
        let metrics = self.metrics.clone();
        let handle = tokio::spawn(async move {
            while let Some(joined) = workers.join_next().await {
                if let Err(e) = joined {
                    error!("Worker task ended abnormally: {}", e);
                }
            }
            finalize(&stats, sink.as_ref(), &metrics).await
        });

        *self.supervisor_slot() = Some(handle);
        Ok(())
    }

    pub fn stop_run(&self) {
        if self.stats.is_active() {
            info!("Stopping run");
        }
        self.stats.stop();
    }

    /// Waits for the current run's supervisor to finalize.
    pub async fn wait(&self) -> Result<RunSummary, RunnerError> {
        let handle = self.supervisor_slot().take();
        let result_path = match handle {
            Some(handle) => handle
                .await
                .map_err(|e| RunnerError::WorkerFailed(e.to_string()))?,
            None => None,
        };

        Ok(RunSummary {
            stats: self.stats.snapshot(),
            result_path,
        })
    }

    pub fn reset_stats(&self) -> Result<(), RunnerError> {
        self.stats.reset()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.stats.is_run_open()
    }

    fn supervisor_slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<Option<PathBuf>>>> {
        self.supervisor
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn finalize(stats: &RunStats, sink: &dyn ResultSink, metrics: &Metrics) -> Option<PathBuf> {
    let lines = stats.finish_run()?;
    metrics.record_finalized();

    let snapshot = stats.snapshot();
    info!(
        "Run finished: {} accepted, {} rejected, {} exhausted, {} skipped",
        snapshot.accepted, snapshot.rejected, snapshot.exhausted, snapshot.skipped
    );

    if lines.is_empty() {
        return None;
    }

    match sink.persist(&lines).await {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to persist {} results: {}", lines.len(), e);
            None
        }
    }
}
