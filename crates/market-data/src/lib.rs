use crate::error::MarketDataError;
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::ProviderSettings;
use core_types::PriceSeries;
use std::time::Duration;

pub mod error;
pub mod response;

// --- Public API ---
pub use response::{ColumnKey, HistoryResponse};

/// The generic, abstract interface for a market-data history provider.
/// This trait is the contract the report pipeline uses, allowing the
/// underlying transport (live HTTP or mock) to be swapped out.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetches the raw tabular price history for one symbol over a date range.
    async fn get_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoryResponse, MarketDataError>;
}

/// A concrete `HistoryProvider` backed by an HTTP history endpoint.
#[derive(Clone)]
pub struct HttpHistoryProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpHistoryProvider {
    pub fn new(settings: &ProviderSettings) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl HistoryProvider for HttpHistoryProvider {
    async fn get_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoryResponse, MarketDataError> {
        let url = format!("{}/history", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("start", &start.to_string()),
                ("end", &end.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(MarketDataError::Provider(format!(
                "HTTP {status} for '{symbol}': {text}"
            )));
        }

        serde_json::from_str::<HistoryResponse>(&text)
            .map_err(|e| MarketDataError::InvalidData(e.to_string()))
    }
}

/// Retrieves and normalizes price histories.
///
/// Validates the request, delegates the transport to a `HistoryProvider`, and
/// turns the raw table into a canonical `PriceSeries` (price-column fallback,
/// timezone collapse, duplicate-date removal).
pub struct PriceSeriesFetcher<P: HistoryProvider> {
    provider: P,
}

impl<P: HistoryProvider> PriceSeriesFetcher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError> {
        if symbol.trim().is_empty() {
            return Err(MarketDataError::InvalidRequest(
                "symbol must not be empty".to_string(),
            ));
        }
        if start > end {
            return Err(MarketDataError::InvalidRequest(format!(
                "start date {start} is after end date {end}"
            )));
        }

        let response = self.provider.get_history(symbol, start, end).await?;
        tracing::debug!(%symbol, rows = response.index.len(), "received history rows");

        response.into_price_series(symbol)
    }
}
