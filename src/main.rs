//! Sentimenty - Main Entry Point
//!
//! Offline tweet sentiment pipeline: train, evaluate, predict, analyze.

use clap::Parser;
use sentimenty::cli::{cmd_analyze, cmd_evaluate, cmd_predict, cmd_train, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentimenty=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    match cli.command {
        Some(Commands::Train) => cmd_train(&config)?,
        Some(Commands::Evaluate) => cmd_evaluate(&config)?,
        Some(Commands::Predict) => cmd_predict(&config)?,
        Some(Commands::Analyze) => cmd_analyze(&config)?,
        None => {
            // Default: run the full pipeline in order
            cmd_train(&config)?;
            cmd_evaluate(&config)?;
            cmd_predict(&config)?;
            cmd_analyze(&config)?;
        }
    }

    Ok(())
}
