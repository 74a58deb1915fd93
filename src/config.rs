//! Configuration management with serde serialization/deserialization

use crate::RunnerError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const MIN_WORKERS: usize = 1;
pub const MAX_WORKERS: usize = 10;

/// Main configuration structure for a run
///
/// # Examples
///
/// ```rust
/// use shard_runner::Config;
///
/// let config = Config {
///     worker_count: 4,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Number of concurrent workers, one per shard (1-10, default: 1)
    pub worker_count: usize,

    /// Retry policy for transient job failures
    pub retry: RetryConfig,

    /// Timeout applied to every outbound request (default: 15 seconds)
    pub request_timeout: Duration,

    /// Custom User-Agent string for requests
    pub user_agent: Option<String>,

    /// Lines shorter than this after trimming are skipped (default: 5)
    pub min_line_length: usize,

    /// Directory receiving `<YYYY-MM-DD-HH-MM>.txt` result files
    pub result_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_count: 1,
            retry: RetryConfig::default(),
            request_timeout: Duration::from_secs(15),
            user_agent: None,
            min_line_length: 5,
            result_dir: PathBuf::from("./result"),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), RunnerError> {
        check_worker_count(self.worker_count)?;

        if self.request_timeout.is_zero() {
            return Err(RunnerError::ConfigurationError(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.retry.max_attempts == 0 {
            return Err(RunnerError::ConfigurationError(
                "Retry attempts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

pub fn check_worker_count(count: usize) -> Result<(), RunnerError> {
    if !(MIN_WORKERS..=MAX_WORKERS).contains(&count) {
        return Err(RunnerError::InvalidWorkerCount(count));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    pub max_attempts: usize,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let delay = self.initial_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32);
        let delay = Duration::from_millis(delay as u64);

        if delay > self.max_delay {
            self.max_delay
        } else {
            delay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.worker_count, 1);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.result_dir, PathBuf::from("./result"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_worker_count_bounds() {
        for count in [0, 11, 100] {
            let config = Config { worker_count: count, ..Default::default() };
            assert!(matches!(config.validate(), Err(RunnerError::InvalidWorkerCount(c)) if c == count));
        }
        assert!(check_worker_count(10).is_ok());
    }

    #[test]
    fn test_retry_delay_is_capped() {
        let retry = RetryConfig::default();
        assert_eq!(retry.delay_for(0), Duration::from_millis(100));
        assert_eq!(retry.delay_for(2), Duration::from_millis(400));
        assert_eq!(retry.delay_for(20), Duration::from_secs(10));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: Config = serde_json::from_str(r#"{"worker_count": 3}"#).unwrap();
        assert_eq!(config.worker_count, 3);
        assert_eq!(config.min_line_length, 5);
    }
}
