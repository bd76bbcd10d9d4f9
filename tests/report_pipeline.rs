//! End-to-end pipeline tests against a mock history provider.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use core_types::ReportTier;
use market_data::error::MarketDataError;
use market_data::{ColumnKey, HistoryProvider, HistoryResponse};
use reporter::{ReportDocument, TearsheetRenderer};
use std::collections::HashMap;
use tearsheet::{ReportRequest, generate_report};

struct MockProvider {
    responses: HashMap<String, HistoryResponse>,
}

#[async_trait]
impl HistoryProvider for MockProvider {
    async fn get_history(
        &self,
        symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<HistoryResponse, MarketDataError> {
        self.responses
            .get(symbol)
            .cloned()
            .ok_or_else(|| MarketDataError::Provider(format!("unknown symbol '{symbol}'")))
    }
}

fn millis(day: u32) -> i64 {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .unwrap()
        .timestamp_millis()
}

fn history(days: &[u32], prices: &[f64]) -> HistoryResponse {
    HistoryResponse {
        columns: vec![ColumnKey::Flat("Adj Close".to_string())],
        index: days.iter().map(|d| millis(*d)).collect(),
        data: prices.iter().map(|p| vec![Some(*p)]).collect(),
    }
}

fn provider() -> MockProvider {
    let mut responses = HashMap::new();
    // SPY trades Jan 2-5; AGG trades Jan 3-8. Overlapping returns land on
    // Jan 4 and Jan 5.
    responses.insert(
        "SPY".to_string(),
        history(&[2, 3, 4, 5], &[100.0, 110.0, 99.0, 104.5]),
    );
    responses.insert(
        "AGG".to_string(),
        history(&[3, 4, 5, 8], &[50.0, 51.0, 51.0, 52.0]),
    );
    responses
        .insert("EMPTY".to_string(), history(&[], &[]));
    responses.insert(
        "NOCOL".to_string(),
        HistoryResponse {
            columns: vec![ColumnKey::Flat("Volume".to_string())],
            index: vec![millis(2)],
            data: vec![vec![Some(1.0)]],
        },
    );
    MockProvider { responses }
}

fn request(symbol: &str, benchmark: &str, tier: ReportTier) -> ReportRequest {
    ReportRequest {
        symbol: symbol.to_string(),
        benchmark_symbol: benchmark.to_string(),
        start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        tier,
    }
}

#[tokio::test]
async fn basic_report_end_to_end() {
    let document = generate_report(
        provider(),
        TearsheetRenderer::new(),
        &request("SPY", "AGG", ReportTier::Basic),
    )
    .await
    .unwrap();

    let ReportDocument::Basic(metrics) = document else {
        panic!("expected a basic document");
    };
    // Aligned SPY returns are [-0.10, 104.5/99 - 1]; compounded: -5%.
    let total_return = metrics
        .get(analytics::Metric::TotalReturn)
        .unwrap()
        .as_f64()
        .unwrap();
    assert!((total_return + 0.05).abs() < 1e-9, "got {total_return}");
    assert_eq!(metrics.entries().len(), analytics::Metric::CATALOG.len());
}

#[tokio::test]
async fn full_report_renders_html() {
    let document = generate_report(
        provider(),
        TearsheetRenderer::new(),
        &request("SPY", "AGG", ReportTier::Full),
    )
    .await
    .unwrap();

    let ReportDocument::Rendered { tier, html } = document else {
        panic!("expected a rendered document");
    };
    assert_eq!(tier, ReportTier::Full);
    assert!(html.contains("SPY vs AGG"));
}

#[tokio::test]
async fn empty_history_fails_with_empty_series() {
    let err = generate_report(
        provider(),
        TearsheetRenderer::new(),
        &request("EMPTY", "AGG", ReportTier::Basic),
    )
    .await
    .unwrap_err();
    assert!(format!("{err:#}").contains("no rows"), "got: {err:#}");
}

#[tokio::test]
async fn missing_price_column_is_reported() {
    let err = generate_report(
        provider(),
        TearsheetRenderer::new(),
        &request("NOCOL", "AGG", ReportTier::Basic),
    )
    .await
    .unwrap_err();
    assert!(
        format!("{err:#}").contains("No usable price column"),
        "got: {err:#}"
    );
}

#[tokio::test]
async fn disjoint_calendars_report_no_overlap() {
    let mut mock = provider();
    // A benchmark trading on entirely different days than SPY.
    mock.responses.insert(
        "LATE".to_string(),
        history(&[22, 23, 24], &[10.0, 10.1, 10.2]),
    );
    let err = generate_report(
        mock,
        TearsheetRenderer::new(),
        &request("SPY", "LATE", ReportTier::Basic),
    )
    .await
    .unwrap_err();
    assert!(
        format!("{err:#}").contains("No overlapping trading days"),
        "got: {err:#}"
    );
}

#[tokio::test]
async fn unknown_symbol_identifies_the_symbol() {
    let err = generate_report(
        provider(),
        TearsheetRenderer::new(),
        &request("SPY", "NOPE", ReportTier::Basic),
    )
    .await
    .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("NOPE"), "got: {message}");
}
