use crate::{JobOutcome, LineFilter, LineJob, Metrics, RetryConfig, RunStats};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::sleep;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineResult {
    Accepted,
    Rejected,
    Exhausted,
    Cancelled,
}

/// Processes one shard sequentially, checking the run flag before every line.
pub struct ShardWorker {
    id: usize,
    job: Arc<dyn LineJob>,
    stats: Arc<RunStats>,
    metrics: Arc<Metrics>,
    filter: LineFilter,
    retry: RetryConfig,
}

impl ShardWorker {
    pub fn new(
        id: usize,
        job: Arc<dyn LineJob>,
        stats: Arc<RunStats>,
        metrics: Arc<Metrics>,
        filter: LineFilter,
        retry: RetryConfig,
    ) -> Self {
        Self {
            id,
            job,
            stats,
            metrics,
            filter,
            retry,
        }
    }

    pub async fn run(self, shard: Vec<String>) {
        info!("Worker {} starting on {} lines", self.id, shard.len());

        let mut processed = 0;
        for raw in &shard {
            if !self.stats.is_active() {
                info!("Worker {} stopped after {} lines", self.id, processed);
                return;
            }

            let line = match self.filter.check(raw) {
                Ok(line) => line,
                Err(reason) => {
                    debug!("Worker {} skipped {:?}: {:?}", self.id, raw, reason);
                    self.stats.record_skipped();
                    self.metrics.record_skip();
                    continue;
                }
            };

            if self.process_line(line).await == LineResult::Cancelled {
                info!("Worker {} stopped during retries", self.id);
                return;
            }
            processed += 1;
        }

        info!("Worker {} finished its shard", self.id);
    }

    async fn process_line(&self, line: &str) -> LineResult {
        let started = Instant::now();

        for attempt in 0..self.retry.max_attempts {
            if attempt > 0 && !self.stats.is_active() {
                return LineResult::Cancelled;
            }

            match self.job.attempt(line).await {
                Ok(JobOutcome::Accepted { detail }) => {
                    debug!("Worker {} accepted {}", self.id, line);
                    self.stats.record_accepted(JobOutcome::result_line(line, &detail));
                    self.metrics.record_line(started.elapsed(), true);
                    return LineResult::Accepted;
                }
                Ok(JobOutcome::Rejected { reason }) => {
                    warn!("Worker {} rejected {}: {}", self.id, line, reason);
                    self.stats.record_rejected();
                    self.metrics.record_line(started.elapsed(), false);
                    return LineResult::Rejected;
                }
                Err(e) if e.is_retryable() => {
                    if attempt + 1 == self.retry.max_attempts {
                        break;
                    }
                    let delay = self.retry.delay_for(attempt);
                    debug!(
                        "Worker {} retrying {} after {:?} (attempt {}/{}): {}",
                        self.id,
                        line,
                        delay,
                        attempt + 1,
                        self.retry.max_attempts,
                        e
                    );
                    self.metrics.record_retry();
                    sleep(delay).await;
                }
                Err(e) => {
                    warn!("Worker {} failed {}: {}", self.id, line, e);
                    self.stats.record_rejected();
                    self.metrics.record_line(started.elapsed(), false);
                    return LineResult::Rejected;
                }
            }
        }

        warn!(
            "Worker {} gave up on {} after {} attempts",
            self.id, line, self.retry.max_attempts
        );
        self.stats.record_exhausted();
        self.metrics.record_exhausted();
        LineResult::Exhausted
    }
}
