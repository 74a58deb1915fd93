use clap::Parser;
use shard_runner::{load_config, run_file, setup_logging, Cli, Commands, Config};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    setup_logging(args.verbose).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    info!("Starting shard-runner v{}", env!("CARGO_PKG_VERSION"));

    match &args.command {
        Commands::Run { input, .. } => {
            let config = load_config(&args).await?;
            let summary = run_file(config, input).await?;
            info!(
                "Accepted {}, rejected {}, gave up on {}, skipped {}",
                summary.stats.accepted,
                summary.stats.rejected,
                summary.stats.exhausted,
                summary.stats.skipped
            );
            if let Some(path) = summary.result_path {
                info!("Results written to {}", path.display());
            }
        }
        Commands::Validate { config } => {
            let content = tokio::fs::read_to_string(config).await?;
            let parsed: Config = serde_json::from_str(&content)?;
            if let Err(e) = parsed.validate() {
                error!("Invalid configuration: {}", e);
                std::process::exit(1);
            }
            info!("Configuration is valid");
        }
    }

    Ok(())
}
