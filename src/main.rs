use aggregation::{AggregationEngine, SalesReport, month_name};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use core_types::{StoreId, StoreType};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Tally sales-analytics shell.
fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Load the configuration (compiled-in defaults apply when no file exists)
    let config = configuration::load_config()?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &config),
        Commands::Summary(args) => handle_summary(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A terminal dashboard over retail weekly-sales data.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a raw transaction-level weekly-sales export.
    Report(ReportArgs),
    /// Assemble pre-aggregated per-dimension summary tables.
    Summary(SummaryArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Path to the raw sales CSV (Store,Dept,Date,Weekly_Sales,IsHoliday,Type,Size).
    #[arg(long)]
    data: PathBuf,

    /// Print the full report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct SummaryArgs {
    /// Directory holding year.csv, month.csv, stores.csv, departments.csv and
    /// holiday_type.csv.
    #[arg(long)]
    dir: PathBuf,

    /// Print the full report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

/// Handles the raw-export path: load, aggregate, render.
fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Loading {}...", args.data.display()));

    let records = ingest::load_records(&args.data)
        .with_context(|| format!("failed to load sales records from {}", args.data.display()))?;
    spinner.finish_with_message(format!("Loaded {} records", records.len()));

    let engine = AggregationEngine::new();
    let report = engine.calculate(
        &records,
        config.summary.reference_store_id,
        &config.summary.holiday_label,
    )?;

    render(&report, config.summary.reference_store_id, args.json)
}

/// Handles the pre-aggregated path: load the per-dimension tables, assemble,
/// render.
fn handle_summary(args: SummaryArgs, config: &Config) -> Result<()> {
    let tables = ingest::load_summary_tables(&args.dir)
        .with_context(|| format!("failed to load summary tables from {}", args.dir.display()))?;

    let engine = AggregationEngine::new();
    let report = engine.assemble(
        &tables,
        config.summary.reference_store_id,
        &config.summary.holiday_label,
    )?;

    render(&report, config.summary.reference_store_id, args.json)
}

// ==============================================================================
// Rendering
// ==============================================================================

/// Renders the report bundle: a metric-tile table followed by one table per
/// grouped mapping, categories in key order. Pure consumer of the report.
fn render(report: &SalesReport, reference_store: StoreId, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let mut tiles = Table::new();
    tiles.set_header(vec!["Metric", "Value"]);
    tiles.add_row(vec![
        "Most selling store".to_string(),
        format!("Store {}", report.top_store),
    ]);
    tiles.add_row(vec![
        format!("Store {reference_store} type"),
        report.top_store_type.to_string(),
    ]);
    tiles.add_row(vec![
        "Most selling dept".to_string(),
        format!("Dept {}", report.top_dept),
    ]);
    tiles.add_row(vec![
        "Most selling month".to_string(),
        report.top_month.clone(),
    ]);
    tiles.add_row(vec![
        "Most selling holiday".to_string(),
        report.top_holiday_label.clone(),
    ]);
    println!("{tiles}");

    print_table("Sales by year", "Year", &report.sales_by_year);
    print_month_table(&report.sales_by_month)?;
    print_table("Sales by store", "Store", &report.sales_by_store);
    print_table("Sales by department", "Dept", &report.sales_by_dept);
    print_table("Sales by store type", "Type", &report.sales_by_store_type);
    print_holiday_table(&report.sales_by_holiday_and_type);

    Ok(())
}

fn print_table<K: Display>(title: &str, key_header: &str, totals: &BTreeMap<K, f64>) {
    println!("\n{title}");
    let mut table = Table::new();
    table.set_header(vec![key_header, "Weekly Sales"]);
    for (key, value) in totals {
        table.add_row(vec![key.to_string(), format!("{value:.2}")]);
    }
    println!("{table}");
}

/// Month categories render by calendar name rather than number.
fn print_month_table(totals: &BTreeMap<u32, f64>) -> Result<()> {
    println!("\nSales by month");
    let mut table = Table::new();
    table.set_header(vec!["Month", "Weekly Sales"]);
    for (month, value) in totals {
        table.add_row(vec![month_name(*month)?.to_string(), format!("{value:.2}")]);
    }
    println!("{table}");
    Ok(())
}

fn print_holiday_table(totals: &BTreeMap<(bool, StoreType), f64>) {
    println!("\nSales by holiday status and store type");
    let mut table = Table::new();
    table.set_header(vec!["Holiday", "Type", "Weekly Sales"]);
    for (&(is_holiday, store_type), value) in totals {
        let status = if is_holiday { "Holiday" } else { "Non-holiday" };
        table.add_row(vec![
            status.to_string(),
            store_type.to_string(),
            format!("{value:.2}"),
        ]);
    }
    println!("{table}");
}
