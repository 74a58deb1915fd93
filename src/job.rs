use crate::RunnerError;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Accepted { detail: String },
    Rejected { reason: String },
}

impl JobOutcome {
    /// Formats an accepted line as `line - detail`, or just `line` without detail.
    pub fn result_line(line: &str, detail: &str) -> String {
        if detail.is_empty() {
            line.to_string()
        } else {
            format!("{} - {}", line, detail)
        }
    }
}

/// Work performed for a single input line.
///
/// Retryable errors are retried by the worker; anything else ends the line.
#[async_trait]
pub trait LineJob: Send + Sync {
    async fn attempt(&self, line: &str) -> Result<JobOutcome, RunnerError>;
}
