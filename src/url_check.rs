//! Reachability check for URL lists

use crate::{Config, JobOutcome, LineJob, RunnerError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct UrlCheckJob {
    client: Client,
    timeout: Duration,
}

impl UrlCheckJob {
    pub fn new(config: &Config) -> Result<Self, RunnerError> {
        let mut builder = Client::builder().timeout(config.request_timeout);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let client = builder
            .build()
            .map_err(|e| RunnerError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            timeout: config.request_timeout,
        })
    }
}

pub fn parse_target(line: &str) -> Result<Url, RunnerError> {
    let url = Url::parse(line).map_err(|e| RunnerError::InvalidLine(format!("{line}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RunnerError::InvalidLine(format!("unsupported scheme {other}"))),
    }
}

pub fn classify_status(status: StatusCode) -> Result<JobOutcome, RunnerError> {
    if status.is_success() || status.is_redirection() {
        return Ok(JobOutcome::Accepted {
            detail: status.as_u16().to_string(),
        });
    }
    if status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
    {
        return Err(RunnerError::TransientStatus(status.as_u16()));
    }
    Ok(JobOutcome::Rejected {
        reason: format!("status {}", status.as_u16()),
    })
}

#[async_trait]
impl LineJob for UrlCheckJob {
    async fn attempt(&self, line: &str) -> Result<JobOutcome, RunnerError> {
        let url = match parse_target(line) {
            Ok(url) => url,
            Err(e) => {
                return Ok(JobOutcome::Rejected {
                    reason: e.to_string(),
                })
            }
        };

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RunnerError::Timeout(self.timeout)
            } else {
                RunnerError::from(e)
            }
        })?;

        debug!("{} answered {}", line, response.status());
        classify_status(response.status())
    }
}
