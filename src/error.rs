use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RunnerError {
    #[error("Run already active")]
    RunActive,

    #[error("Invalid worker count {0} (expected 1-10)")]
    InvalidWorkerCount(usize),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Transient status {0}")]
    TransientStatus(u16),

    #[error("Invalid line: {0}")]
    InvalidLine(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Worker task failed: {0}")]
    WorkerFailed(String),
}

impl RunnerError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RunnerError::Timeout(_) | RunnerError::NetworkError(_) | RunnerError::TransientStatus(_)
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RunnerError::InvalidLine(_) => ErrorSeverity::Low,
            RunnerError::ConfigurationError(_) => ErrorSeverity::High,
            RunnerError::InvalidWorkerCount(_) => ErrorSeverity::High,
            RunnerError::WorkerFailed(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl From<std::io::Error> for RunnerError {
    fn from(err: std::io::Error) -> Self {
        RunnerError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for RunnerError {
    fn from(err: serde_json::Error) -> Self {
        RunnerError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for RunnerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not expose the configured duration on the error
            RunnerError::Timeout(Duration::ZERO)
        } else if let Some(status) = err.status() {
            RunnerError::TransientStatus(status.as_u16())
        } else {
            RunnerError::NetworkError(err.to_string())
        }
    }
}
