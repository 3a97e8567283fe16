use std::path::PathBuf;

use analytics::RegimeSplit;
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use configuration::{Config, ServerOverrides};
use core_types::{CorrelationRecord, MetricsSnapshot};
use web_server::QueryService;

/// The main entry point for the Brent analytics service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the defaults and config.toml still apply.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let config = configuration::load_config(&cli.config)?;
    let _guard = configuration::init_tracing(&config.logging)?;
    tracing::debug!(path = %cli.config.display(), "Configuration loaded.");

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(overrides) => handle_serve(config, overrides).await,
        Commands::Metrics => handle_metrics(&config),
        Commands::Correlations => handle_correlations(&config),
        Commands::Events => handle_events(&config),
        Commands::Regime => handle_regime(&config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Derived analytics over the daily Brent price series and its market events.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the query API consumed by the dashboard.
    Serve(ServerOverrides),
    /// Print the current metrics snapshot.
    Metrics,
    /// Print the measured impact of every covered event.
    Correlations,
    /// Print the event catalog with the peak volatility following each event.
    Events,
    /// Print the log-return distribution before and after the modeled change point.
    Regime,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(mut config: Config, overrides: ServerOverrides) -> anyhow::Result<()> {
    config.server = config.server.with_overrides(&overrides);
    web_server::run_server(&config).await
}

fn handle_metrics(config: &Config) -> anyhow::Result<()> {
    let service = QueryService::from_config(config)?;
    match service.metrics() {
        Some(snapshot) => println!("{}", metrics_table(&snapshot)?),
        None => match service.load_failure() {
            Some(cause) => println!("No price data available: {cause}"),
            None => println!("No price data available at {}", config.data.prices_path.display()),
        },
    }
    Ok(())
}

fn handle_correlations(config: &Config) -> anyhow::Result<()> {
    let service = QueryService::from_config(config)?;
    let correlations = service.correlations();
    if correlations.is_empty() {
        println!("No event has priced days on both sides of its window.");
    } else {
        println!("{}", correlations_table(&correlations));
    }
    Ok(())
}

fn handle_events(config: &Config) -> anyhow::Result<()> {
    let service = QueryService::from_config(config)?;
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Date", "Event", "Type", "Peak vol after"]);
    for (event, peak) in service.event_peaks() {
        table.add_row(vec![
            event.date.to_string(),
            event.title,
            event.kind,
            peak.map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}")),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn handle_regime(config: &Config) -> anyhow::Result<()> {
    let service = QueryService::from_config(config)?;
    let split = service.regime()?;
    println!("{}", regime_table(&split));
    Ok(())
}

// ==============================================================================
// Report Rendering
// ==============================================================================

fn metrics_table(snapshot: &MetricsSnapshot) -> anyhow::Result<Table> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table.add_row(vec![Cell::new("Latest price"), Cell::new(format!("{:.2}", snapshot.latest_price))]);
    table.add_row(vec![Cell::new("Average price"), Cell::new(format!("{:.2}", snapshot.avg_price))]);
    table.add_row(vec![Cell::new("Max price"), Cell::new(format!("{:.2}", snapshot.max_price))]);
    table.add_row(vec![Cell::new("Min price"), Cell::new(format!("{:.2}", snapshot.min_price))]);
    table.add_row(vec![
        Cell::new("Current volatility"),
        Cell::new(format!("{:.4}", snapshot.current_volatility)),
    ]);
    table.add_row(vec![
        Cell::new("Change-point summary"),
        Cell::new(serde_json::to_string_pretty(&snapshot.cp_summary)?),
    ]);
    Ok(table)
}

fn correlations_table(correlations: &[CorrelationRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Date",
        "Event",
        "Type",
        "Avg before",
        "Avg after",
        "Price chg %",
        "Vol chg %",
    ]);
    for c in correlations {
        table.add_row(vec![
            c.date.to_string(),
            c.title.clone(),
            c.kind.clone(),
            format!("{:.2}", c.avg_price_before),
            format!("{:.2}", c.avg_price_after),
            format!("{:+.2}", c.price_change_pct),
            format!("{:+.2}", c.vol_change_pct),
        ]);
    }
    table
}

fn regime_table(split: &RegimeSplit) -> Table {
    let fmt = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.5}"));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        format!("Change point {}", split.change_point),
        "Before".to_string(),
        "After".to_string(),
    ]);
    table.add_row(vec![
        "Log returns".to_string(),
        split.before.count.to_string(),
        split.after.count.to_string(),
    ]);
    table.add_row(vec!["Observed mean".to_string(), fmt(split.before.mean), fmt(split.after.mean)]);
    table.add_row(vec!["Std dev".to_string(), fmt(split.before.std_dev), fmt(split.after.std_dev)]);
    table.add_row(vec!["Model mu".to_string(), fmt(split.mu_before), fmt(split.mu_after)]);
    table
}
