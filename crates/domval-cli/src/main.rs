//! Domval CLI - Command-line interface for the domain valuation pipeline.

use anyhow::Context;
use clap::Parser;
use domval_cli::commands;
use domval_cli::{Cli, Command, Config, Formatter};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (log to stderr)
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    // Load config
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    debug!("Using configuration {}", config_path.display());
    let config = Config::load_from(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter).await?;
        }
        cmd => {
            // Commands that run the pipeline
            domval_valuator::init(config.valuator.clone())?;

            match cmd {
                Command::Value(args) => {
                    commands::execute_value(args, &formatter).await?;
                }
                Command::Batch(args) => {
                    commands::execute_batch(args, &formatter).await?;
                }
                Command::Features(args) => {
                    commands::execute_features(args, &formatter).await?;
                }
                Command::Config(_) => unreachable!(),
            }

            domval_valuator::shutdown();
        }
    }

    Ok(())
}
