//! Pulse: transaction analytics for the revenue dashboard.
//!
//! Loads a transaction snapshot, aggregates it for the selected range and
//! filters, and prints the result.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pulse_core::config::AppConfig;
use pulse_core::types::{AcquisitionSource, AgeGroup, Gender, TimeRange, Transaction};
use pulse_reporting::{format_with_affixes, AggregationRequest, AggregationResult, DashboardEngine};
use pulse_segmentation::{FilterSet, RevenueRange};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(about = "Aggregate purchase transactions into dashboard metrics")]
#[command(version)]
struct Cli {
    /// JSON file holding an array of transactions
    #[arg(long, short)]
    input: PathBuf,

    /// Optional TOML config file
    #[arg(long, env = "PULSE_CONFIG")]
    config: Option<PathBuf>,

    /// Time range: 7d, 30d or all (overrides config)
    #[arg(long, short)]
    range: Option<TimeRange>,

    /// Reference instant in epoch milliseconds (defaults to now)
    #[arg(long)]
    now: Option<i64>,

    /// Keep only these acquisition sources (repeatable)
    #[arg(long = "source")]
    sources: Vec<AcquisitionSource>,

    /// Keep only these genders (repeatable)
    #[arg(long = "gender")]
    genders: Vec<Gender>,

    /// Keep only these age groups, e.g. 20-29 (repeatable)
    #[arg(long = "age")]
    age_groups: Vec<AgeGroup>,

    /// Keep only these revenue bands, e.g. 100-500 or 5000+ (repeatable)
    #[arg(long = "revenue", value_parser = parse_revenue_range)]
    revenue_ranges: Vec<RevenueRange>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Summary,
}

impl Cli {
    fn filters(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        for source in &self.sources {
            filters.sources.insert(source.clone());
        }
        for gender in &self.genders {
            filters.genders.insert(*gender);
        }
        for group in &self.age_groups {
            filters.age_groups.insert(*group);
        }
        for range in &self.revenue_ranges {
            filters.revenue_ranges.insert(*range);
        }
        filters
    }
}

/// Parses `min-max` or `min+`, with optional `$` signs and thousands commas.
fn parse_revenue_range(raw: &str) -> Result<RevenueRange, String> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',' | ' ')).collect();
    let number = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| format!("invalid revenue bound '{s}' in '{raw}'"))
    };

    let range = if let Some(min) = cleaned.strip_suffix('+') {
        RevenueRange::at_least(number(min)?)
    } else if let Some((min, max)) = cleaned.split_once('-') {
        RevenueRange::bounded(number(min)?, number(max)?)
    } else {
        return Err(format!("expected 'min-max' or 'min+', got '{raw}'"));
    };

    match range.max {
        Some(max) if max < range.min => Err(format!("revenue range '{raw}' has max below min")),
        _ => Ok(range),
    }
}

fn load_transactions(path: &Path) -> anyhow::Result<Vec<Transaction>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading transactions from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing transactions in {}", path.display()))
}

/// An explicitly named config file must load. Without one, a bad environment
/// override is logged and the defaults are used.
fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(Some(path))
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(AppConfig::load(None).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        })),
    }
}

fn summary(result: &AggregationResult) -> String {
    let kpis = &result.kpis;
    let mut out = format!(
        "{}\n  Revenue        {} ({:+.1}%)\n  Transactions   {} ({:+.1}%)\n  Customers      {}\n",
        result.range.label(),
        format_with_affixes(kpis.total_revenue, "$", ""),
        kpis.revenue_change_pct,
        format_with_affixes(kpis.total_transactions as f64, "", ""),
        kpis.transactions_change_pct,
        format_with_affixes(kpis.unique_customers as f64, "", ""),
    );
    if !result.attribution.is_empty() {
        out.push_str("  Attribution\n");
        for share in &result.attribution {
            out.push_str(&format!("    {:<12} {:>3}%\n", share.label, share.percentage));
        }
    }
    out
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pulse=info,pulse_reporting=info".into());
    if cli.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = load_config(cli.config.as_deref())?;

    let range = cli.range.unwrap_or(config.dashboard.default_range);
    let transactions = load_transactions(&cli.input)?;
    info!(
        transactions = transactions.len(),
        range = range.label(),
        "Snapshot loaded"
    );

    let mut request = AggregationRequest::new(range);
    if let Some(now) = cli.now {
        request = request.at(now);
    }
    let filters = cli.filters();
    if filters.is_active() {
        request = request.with_filters(filters);
    }

    let engine = DashboardEngine::new(config.palette());
    let result = engine.compute(&transactions, &request)?;

    match cli.output {
        OutputFormat::Json if cli.pretty => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Json => println!("{}", serde_json::to_string(&result)?),
        OutputFormat::Summary => print!("{}", summary(&result)),
    }

    Ok(())
}
