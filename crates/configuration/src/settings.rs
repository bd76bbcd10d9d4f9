use chrono::NaiveDate;
use core_types::ReportTier;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderSettings,
    pub report: ReportSettings,
}

/// Connection parameters for the market-data provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    /// Base URL of the history endpoint (e.g., "https://data.example.com").
    pub base_url: String,
    /// Per-request timeout in seconds. Timeouts are the provider's concern;
    /// the pipeline itself imposes no deadline.
    pub timeout_secs: u64,
}

/// Defaults for report generation, overridable from the command line.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    /// The benchmark symbol used when none is given (e.g., "SPY").
    pub benchmark_symbol: String,
    /// The start of the history window when no --from is given.
    pub default_start_date: NaiveDate,
    /// The report tier used when none is given.
    pub default_tier: ReportTier,
}
