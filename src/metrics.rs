use metrics::{Counter, Histogram};
use std::time::Duration;

pub struct Metrics {
    pub lines_accepted: Counter,
    pub lines_rejected: Counter,
    pub lines_exhausted: Counter,
    pub lines_skipped: Counter,
    pub retry_count: Counter,
    pub line_duration: Histogram,
    pub runs_finalized: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            lines_accepted: Counter::noop(),
            lines_rejected: Counter::noop(),
            lines_exhausted: Counter::noop(),
            lines_skipped: Counter::noop(),
            retry_count: Counter::noop(),
            line_duration: Histogram::noop(),
            runs_finalized: Counter::noop(),
        }
    }

    pub fn record_line(&self, duration: Duration, accepted: bool) {
        if accepted {
            self.lines_accepted.increment(1);
        } else {
            self.lines_rejected.increment(1);
        }
        self.line_duration.record(duration.as_secs_f64());
    }

    pub fn record_exhausted(&self) {
        self.lines_exhausted.increment(1);
    }

    pub fn record_skip(&self) {
        self.lines_skipped.increment(1);
    }

    pub fn record_retry(&self) {
        self.retry_count.increment(1);
    }

    pub fn record_finalized(&self) {
        self.runs_finalized.increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
