//! Output formatting for the CLI.

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use colored::*;
use domval_domain::{FeatureSet, FeatureVector, ValuationResult};
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format one valuation.
    pub fn format_valuation(&self, result: &ValuationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&valuation_json(result))?),
            OutputFormat::Table => Ok(self.format_valuation_table(result)),
            OutputFormat::Quiet => Ok(format!("{:.2}", result.value)),
        }
    }

    /// Format a list of valuations.
    pub fn format_valuations(&self, results: &[ValuationResult]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = results.iter().map(valuation_json).collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => Ok(self.format_valuations_table(results)),
            OutputFormat::Quiet => Ok(results
                .iter()
                .map(|r| format!("{}\t{:.2}", r.domain, r.value))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format an extracted feature set.
    pub fn format_features(&self, domain: &str, features: &FeatureSet) -> Result<String> {
        let vector = features.to_vector();
        let signals = features.signals();

        match self.format {
            OutputFormat::Json => {
                let mut map = serde_json::Map::new();
                for (name, signal) in FeatureVector::NAMES.iter().zip(signals) {
                    map.insert(name.to_string(), serde_json::json!(signal));
                }
                let json = serde_json::json!({
                    "domain": domain,
                    "features": map,
                    "previous_sales": features.historical.previous_sales,
                    "completeness": features.completeness(),
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Feature", "Value", "Source"]);
                for ((name, value), signal) in vector.named().zip(signals) {
                    let source = if signal.is_some() { "measured" } else { "default" };
                    builder.push_record([name.to_string(), format!("{:.4}", value), source.to_string()]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(format!(
                    "{}\n{}",
                    self.colorize(&format!("Features for {}", domain), "cyan"),
                    table
                ))
            }
            OutputFormat::Quiet => Ok(vector
                .as_slice()
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",")),
        }
    }

    /// Format the active configuration.
    pub fn format_config(&self, config: &Config, path: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "path": path.display().to_string(),
                "config": config,
            }))?),
            OutputFormat::Table => Ok(format!(
                "{}\n{}",
                self.info(&format!("Configuration: {}", path.display())),
                config.to_toml()?
            )),
            OutputFormat::Quiet => config.to_toml(),
        }
    }

    fn format_valuation_table(&self, result: &ValuationResult) -> String {
        let report = &result.report;
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Domain".to_string(), result.domain.clone()]);
        builder.push_record(["Value".to_string(), format_currency(result.value)]);
        builder.push_record([
            "Confidence".to_string(),
            format!("{:.0}%", result.confidence * 100.0),
        ]);
        builder.push_record(["Model".to_string(), result.model.to_string()]);
        builder.push_record([
            "Target range".to_string(),
            format!(
                "{} - {}",
                format_currency(report.target_low),
                format_currency(report.target_high)
            ),
        ]);
        builder.push_record(["Segment".to_string(), report.segment.as_str().to_string()]);
        builder.push_record([
            "Liquidity".to_string(),
            format!("{:.1}", report.liquidity_score),
        ]);
        builder.push_record(["Risk".to_string(), report.risk_level.as_str().to_string()]);
        builder.push_record([
            "Recommendation".to_string(),
            report.recommendation.as_str().to_string(),
        ]);
        builder.push_record(["Value drivers".to_string(), result.value_drivers.join("\n")]);
        builder.push_record(["Market insights".to_string(), result.market_insights.join("\n")]);
        builder.push_record([
            "Comparables".to_string(),
            result.comparable_domains.join(", "),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!(
            "{} {}\n{}",
            self.colorize(&result.domain, "cyan"),
            self.colorize(&format_currency(result.value), "green"),
            table
        )
    }

    fn format_valuations_table(&self, results: &[ValuationResult]) -> String {
        if results.is_empty() {
            return self.colorize("No domains valued.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Domain", "Value", "Confidence", "Model", "Recommendation"]);
        for result in results {
            builder.push_record([
                result.domain.clone(),
                format_currency(result.value),
                format!("{:.0}%", result.confidence * 100.0),
                result.model.to_string(),
                result.report.recommendation.as_str().to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// JSON representation of a valuation.
pub fn valuation_json(result: &ValuationResult) -> serde_json::Value {
    let report = &result.report;
    serde_json::json!({
        "domain": result.domain,
        "value": result.value,
        "confidence": result.confidence,
        "model": result.model.as_str(),
        "value_drivers": result.value_drivers,
        "comparable_domains": result.comparable_domains,
        "market_insights": result.market_insights,
        "report": {
            "market_segment": report.segment.as_str(),
            "liquidity_score": report.liquidity_score,
            "risk_level": report.risk_level.as_str(),
            "recommendation": report.recommendation.as_str(),
            "target_price_range": [report.target_low, report.target_high],
        }
    })
}

/// Whole currency units with thousands separators, e.g. `$12,345`.
pub fn format_currency(value: f64) -> String {
    let digits = format!("{:.0}", value.max(0.0));
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${}", grouped)
}
