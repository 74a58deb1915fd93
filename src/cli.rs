use crate::{Config, FileSink, RunCoordinator, RunSummary, UrlCheckJob};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "shard-runner")]
#[command(about = "Sharded concurrent URL checker")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, help = "Configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Directory for result files")]
    pub result_dir: Option<PathBuf>,

    #[arg(long, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check every URL in a file
    Run {
        #[arg(short, long, help = "Input file (one URL per line)")]
        input: PathBuf,

        #[arg(short, long, help = "Worker count (1-10)")]
        workers: Option<usize>,
    },

    /// Validate configuration
    Validate {
        #[arg(short, long, help = "Configuration file to validate")]
        config: PathBuf,
    },
}

pub async fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let content = fs::read_to_string(path).await?;
            serde_json::from_str(&content)?
        }
        None => Config::default(),
    };

    if let Some(timeout) = cli.timeout {
        config.request_timeout = std::time::Duration::from_secs(timeout);
    }
    if let Some(dir) = &cli.result_dir {
        config.result_dir = dir.clone();
    }
    if let Commands::Run { workers: Some(workers), .. } = &cli.command {
        config.worker_count = *workers;
    }

    config.validate()?;
    info!("Worker count: {}", config.worker_count);
    info!("Request timeout: {:?}", config.request_timeout);
    Ok(config)
}

pub async fn read_lines(path: &PathBuf) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path).await?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Runs the URL checker until the input is exhausted or Ctrl-C stops it.
pub async fn run_file(config: Config, input: &PathBuf) -> anyhow::Result<RunSummary> {
    let lines = read_lines(input).await?;
    let job = Arc::new(UrlCheckJob::new(&config)?);
    let sink = Arc::new(FileSink::new(config.result_dir.clone()));
    let workers = config.worker_count;
    let coordinator = Arc::new(RunCoordinator::new(config, job, sink));

    coordinator.start_run(lines, workers)?;

    let stopper = coordinator.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl-C, stopping run");
            stopper.stop_run();
        }
    });

    let summary = coordinator.wait().await?;
    ctrl_c.abort();
    Ok(summary)
}

pub fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    Ok(())
}
