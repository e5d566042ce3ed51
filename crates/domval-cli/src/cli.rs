//! CLI command definitions and argument parsing.

use crate::error::{CliError, Result};
use clap::{Args, Parser, Subcommand};
use domval_domain::{DomainInput, MarketContext, TrafficStats};
use std::path::PathBuf;

/// Domval CLI - Estimate the market value of domain names.
#[derive(Debug, Parser)]
#[command(name = "domval")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DOMVAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Valuate a single domain
    Value(ValueArgs),

    /// Valuate every domain listed in a JSON file
    Batch(BatchArgs),

    /// Show the extracted feature set for a domain
    Features(ValueArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the value and features commands.
#[derive(Debug, Args)]
pub struct ValueArgs {
    /// Fully qualified domain name (e.g. crypto.ai)
    pub name: String,

    #[command(flatten)]
    pub domain: DomainArgs,

    #[command(flatten)]
    pub market: MarketArgs,
}

/// Optional facts about the domain.
#[derive(Debug, Default, Args)]
pub struct DomainArgs {
    /// TLD, when it differs from the last label of the name
    #[arg(long)]
    pub tld: Option<String>,

    /// Registration time (unix seconds)
    #[arg(long)]
    pub registered_at: Option<u64>,

    /// Historical prices, oldest first
    #[arg(long = "price", value_delimiter = ',')]
    pub prices: Vec<f64>,

    /// Previous sale prices
    #[arg(long = "sale", value_delimiter = ',')]
    pub sales: Vec<f64>,

    /// Monthly visitors
    #[arg(long)]
    pub visitors: Option<u64>,

    /// Bounce rate (0.0-1.0), requires --visitors
    #[arg(long)]
    pub bounce_rate: Option<f64>,

    /// Average session length in seconds, requires --visitors
    #[arg(long)]
    pub session_secs: Option<f64>,
}

/// Market conditions for the domain's niche.
#[derive(Debug, Args)]
pub struct MarketArgs {
    /// Industry trend (0.0-1.0)
    #[arg(long, default_value = "0.5")]
    pub trend: f64,

    /// Market volatility (0.0-1.0)
    #[arg(long, default_value = "0.5")]
    pub volatility: f64,

    /// Competitor density (0.0-1.0)
    #[arg(long, default_value = "0.5")]
    pub competition: f64,

    /// Monthly search volume for related keywords
    #[arg(long, default_value = "0")]
    pub search_volume: f64,
}

/// Arguments for the batch command.
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// JSON file with an array of {"domain": ..., "market": ...} entries ("-" for stdin)
    pub file: String,
}

/// Arguments for configuration management.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Overwrite the configuration file with defaults
    Reset,
}

impl DomainArgs {
    /// Build the domain input for `name`
    pub fn to_input(&self, name: &str) -> Result<DomainInput> {
        let mut input = match &self.tld {
            Some(tld) => DomainInput::new(name, tld.as_str()),
            None => DomainInput::parse(name),
        }
        .with_price_history(self.prices.clone())
        .with_previous_sales(self.sales.clone());

        if let Some(registered_at) = self.registered_at {
            input = input.with_registered_at(registered_at);
        }

        match self.visitors {
            Some(visitors) => {
                input = input.with_traffic(TrafficStats::new(
                    visitors,
                    self.bounce_rate.unwrap_or(0.5),
                    self.session_secs.unwrap_or(0.0),
                ));
            }
            None if self.bounce_rate.is_some() || self.session_secs.is_some() => {
                return Err(CliError::InvalidInput(
                    "--bounce-rate and --session-secs require --visitors".to_string(),
                ));
            }
            None => {}
        }

        Ok(input)
    }
}

impl MarketArgs {
    /// Build the market context
    pub fn to_context(&self) -> MarketContext {
        MarketContext::new(
            self.trend,
            self.volatility,
            self.competition,
            self.search_volume,
        )
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
