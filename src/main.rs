use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use core_types::ReportTier;
use market_data::HttpHistoryProvider;
use reporter::{ReportDocument, TearsheetRenderer};
use std::path::PathBuf;
use tearsheet::{ReportRequest, generate_report};
use tracing_subscriber::EnvFilter;

/// The main entry point for the tearsheet application.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(args) => {
            if let Err(e) = handle_report(args).await {
                eprintln!("Error generating report: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance-analytics reports for an instrument versus a benchmark.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a performance report for a symbol against a benchmark.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// The instrument symbol (e.g., "SPY").
    #[arg(long)]
    symbol: String,

    /// The benchmark symbol (defaults to the configured benchmark).
    #[arg(long)]
    benchmark: Option<String>,

    /// The start date of the history window (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// The end date of the history window (format: YYYY-MM-DD, defaults to today).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// The report tier: basic, full or detailed.
    #[arg(long)]
    tier: Option<ReportTier>,

    /// Where to write rendered (full/detailed) reports.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the report document as JSON instead of the default output.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Handles the orchestration of one report request.
async fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let config = configuration::load_config()?;

    let symbol = args.symbol.to_uppercase();
    let benchmark = args
        .benchmark
        .map(|b| b.to_uppercase())
        .unwrap_or_else(|| config.report.benchmark_symbol.clone());
    let request = ReportRequest {
        symbol: symbol.clone(),
        benchmark_symbol: benchmark,
        start: args.from.unwrap_or(config.report.default_start_date),
        end: args.to.unwrap_or_else(|| Utc::now().date_naive()),
        tier: args.tier.unwrap_or(config.report.default_tier),
    };

    let provider = HttpHistoryProvider::new(&config.provider)?;
    let renderer = TearsheetRenderer::new();
    let document = generate_report(provider, renderer, &request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    match document {
        ReportDocument::Basic(metrics) => {
            let mut table = Table::new();
            table.set_header(vec!["Metric", "Value"]);
            for entry in metrics.entries() {
                table.add_row(vec![
                    entry.metric.label().to_string(),
                    entry.formatted_value(),
                ]);
            }
            println!("{} vs {}", request.symbol, request.benchmark_symbol);
            println!("{table}");
        }
        ReportDocument::Rendered { tier, html } => {
            let path = args
                .output
                .unwrap_or_else(|| PathBuf::from(format!("tearsheet-{symbol}-{tier}.html")));
            std::fs::write(&path, html)?;
            println!("Wrote {tier} report to {}", path.display());
        }
    }

    Ok(())
}
