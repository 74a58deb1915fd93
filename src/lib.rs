//! # Shard Runner
//!
//! Processes a list of text lines with a pool of concurrent workers. The input is
//! split into balanced contiguous shards, one tokio task runs per shard, and a
//! supervisor finalizes the run exactly once when every worker has stopped.
//!
//! ## Features
//!
//! - **Balanced sharding**: shard sizes differ by at most one line
//! - **Cooperative stop**: workers check the run flag before every line
//! - **Retry logic**: exponential backoff for transient failures, with a cap
//! - **Shared statistics**: atomic counters plus an accepted-result buffer
//! - **Exactly-once finalization**: accepted lines are persisted once per run
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shard_runner::{Config, FileSink, RunCoordinator, UrlCheckJob};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let job = Arc::new(UrlCheckJob::new(&config)?);
//!     let sink = Arc::new(FileSink::new(config.result_dir.clone()));
//!     let coordinator = RunCoordinator::new(config, job, sink);
//!
//!     coordinator.start_run(vec!["https://example.com".to_string()], 1)?;
//!     let summary = coordinator.wait().await?;
//!     println!("accepted: {}", summary.stats.accepted);
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! shard-runner run --input urls.txt --workers 4
//! ```

/// Configuration and settings
pub mod config;

/// Error types and error handling utilities
pub mod error;

/// Balanced partitioning of input lines
pub mod shard;

/// Shared run statistics
pub mod stats;

/// Per-line pre-filtering
pub mod filter;

/// The per-line job interface
pub mod job;

/// URL reachability job
pub mod url_check;

/// Shard workers with retry handling
pub mod worker;

/// Run lifecycle and finalization
pub mod coordinator;

/// Result persistence
pub mod sink;

/// Command-line interface implementation
pub mod cli;

/// Metrics handles
pub mod metrics;

#[cfg(test)]
mod tests;

pub use cli::*;
pub use config::*;
pub use coordinator::*;
pub use error::*;
pub use filter::*;
pub use job::*;
pub use metrics::*;
pub use shard::*;
pub use sink::*;
pub use stats::*;
pub use url_check::*;
pub use worker::*;
