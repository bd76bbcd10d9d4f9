//! Pipeline orchestration for one report request: fetch both price histories,
//! convert to returns, align, compute the metric catalog, assemble the
//! requested report tier.

use analytics::{MetricsEngine, align, to_returns};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use core_types::{NanPolicy, ReportTier};
use market_data::{HistoryProvider, PriceSeriesFetcher};
use reporter::{Renderer, ReportAssembler, ReportDocument};

/// The parameters of one report request, as exposed to the hosting shell.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub symbol: String,
    pub benchmark_symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub tier: ReportTier,
}

/// Runs the full pipeline for one request.
///
/// Each stage returns a typed failure that is wrapped with enough context to
/// tell the caller which symbol or stage failed; nothing here terminates the
/// hosting process. No state outlives the request.
pub async fn generate_report<P, R>(
    provider: P,
    renderer: R,
    request: &ReportRequest,
) -> Result<ReportDocument>
where
    P: HistoryProvider,
    R: Renderer,
{
    let fetcher = PriceSeriesFetcher::new(provider);

    // The two histories are independent, so fetch them concurrently.
    let (instrument_prices, benchmark_prices) = tokio::try_join!(
        async {
            fetcher
                .fetch(&request.symbol, request.start, request.end)
                .await
                .with_context(|| format!("fetching history for '{}'", request.symbol))
        },
        async {
            fetcher
                .fetch(&request.benchmark_symbol, request.start, request.end)
                .await
                .with_context(|| format!("fetching history for '{}'", request.benchmark_symbol))
        },
    )?;
    tracing::info!(
        instrument_days = instrument_prices.len(),
        benchmark_days = benchmark_prices.len(),
        "fetched price histories"
    );

    // Drop the first return on both sides: the series feed a two-series
    // comparison, not a chart.
    let instrument_returns = to_returns(&instrument_prices, NanPolicy::Drop)
        .with_context(|| format!("deriving returns for '{}'", request.symbol))?;
    let benchmark_returns = to_returns(&benchmark_prices, NanPolicy::Drop)
        .with_context(|| format!("deriving returns for '{}'", request.benchmark_symbol))?;

    let pair = align(&instrument_returns, &benchmark_returns).with_context(|| {
        format!(
            "aligning '{}' against '{}'",
            request.symbol, request.benchmark_symbol
        )
    })?;
    tracing::info!(days = pair.len(), "aligned return series");

    let metrics = MetricsEngine::new()
        .compute(pair.instrument(), Some(pair.benchmark()))
        .with_context(|| format!("computing metrics for '{}'", request.symbol))?;

    let title = format!("{} vs {}", request.symbol, request.benchmark_symbol);
    let assembler = ReportAssembler::new(renderer, title);
    let document = assembler
        .assemble(request.tier, pair.instrument(), pair.benchmark(), &metrics)
        .context("assembling report")?;

    Ok(document)
}
