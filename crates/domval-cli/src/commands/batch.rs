//! Batch command implementation.

use crate::cli::BatchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use domval_domain::{DomainInput, MarketContext, TrafficStats};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use tracing::{debug, warn};

/// Execute the batch command.
///
/// Entries are valued concurrently; an invalid entry is reported and
/// skipped without aborting the rest.
pub async fn execute_batch(args: BatchArgs, formatter: &Formatter) -> Result<()> {
    debug!("Reading batch from {}", args.file);
    let json_data = if args.file == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(&args.file)?
    };

    let entries = parse_entries(&json_data)?;
    debug!("Valuing {} batch entries", entries.len());

    let handles: Vec<_> = entries
        .into_iter()
        .map(|entry| {
            let name = entry.domain.name.clone();
            let (domain, market) = entry.into_inputs();
            let handle = tokio::spawn(domval_valuator::valuate(domain, market));
            (name, handle)
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    let mut failures = 0;
    for (name, handle) in handles {
        match handle.await {
            Ok(Ok(result)) => results.push(result),
            Ok(Err(e)) => {
                failures += 1;
                warn!("Skipping {}: {}", name, e);
            }
            Err(e) => {
                failures += 1;
                warn!("Skipping {}: valuation task failed: {}", name, e);
            }
        }
    }

    debug!("Valued {} entries, skipped {}", results.len(), failures);
    println!("{}", formatter.format_valuations(&results)?);

    if results.is_empty() && failures > 0 {
        return Err(CliError::InvalidInput(format!(
            "All {} entries failed",
            failures
        )));
    }

    Ok(())
}

/// Parse a batch file.
fn parse_entries(json: &str) -> Result<Vec<BatchEntry>> {
    let entries: Vec<BatchEntry> = serde_json::from_str(json)?;
    if entries.is_empty() {
        return Err(CliError::InvalidInput("No domains provided".to_string()));
    }
    Ok(entries)
}

/// One domain and its market.
#[derive(Debug, Deserialize)]
struct BatchEntry {
    domain: DomainDef,
    #[serde(default)]
    market: MarketDef,
}

#[derive(Debug, Deserialize)]
struct DomainDef {
    name: String,
    #[serde(default)]
    tld: Option<String>,
    #[serde(default)]
    registered_at: Option<u64>,
    #[serde(default)]
    price_history: Vec<f64>,
    #[serde(default)]
    previous_sales: Vec<f64>,
    #[serde(default)]
    traffic: Option<TrafficDef>,
}

#[derive(Debug, Deserialize)]
struct TrafficDef {
    monthly_visitors: u64,
    bounce_rate: f64,
    #[serde(default)]
    avg_session_secs: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MarketDef {
    industry_trend: f64,
    market_volatility: f64,
    competitor_density: f64,
    search_volume: f64,
}

impl Default for MarketDef {
    fn default() -> Self {
        let market = MarketContext::default();
        Self {
            industry_trend: market.industry_trend,
            market_volatility: market.market_volatility,
            competitor_density: market.competitor_density,
            search_volume: market.search_volume,
        }
    }
}

impl BatchEntry {
    fn into_inputs(self) -> (DomainInput, MarketContext) {
        let def = self.domain;
        let mut domain = match def.tld {
            Some(tld) => DomainInput::new(def.name, tld),
            None => DomainInput::parse(def.name),
        }
        .with_price_history(def.price_history)
        .with_previous_sales(def.previous_sales);

        if let Some(registered_at) = def.registered_at {
            domain = domain.with_registered_at(registered_at);
        }
        if let Some(traffic) = def.traffic {
            domain = domain.with_traffic(TrafficStats::new(
                traffic.monthly_visitors,
                traffic.bounce_rate,
                traffic.avg_session_secs,
            ));
        }

        let market = MarketContext::new(
            self.market.industry_trend,
            self.market.market_volatility,
            self.market.competitor_density,
            self.market.search_volume,
        );

        (domain, market)
    }
}
