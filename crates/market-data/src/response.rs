use crate::error::MarketDataError;
use chrono::{NaiveDate, TimeZone, Utc};
use core_types::{PricePoint, PriceSeries};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;

/// The field names we accept as a usable price column, in preference order.
const PRICE_FIELDS: [&str; 2] = ["Adj Close", "Close"];

/// A tabular price history in pandas `orient="split"` form.
///
/// `index` holds epoch-millisecond timestamps (UTC); `data` holds one row per
/// timestamp with one cell per column. Cells may be null where the provider
/// has no observation.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub columns: Vec<ColumnKey>,
    pub index: Vec<i64>,
    pub data: Vec<Vec<Option<f64>>>,
}

/// A column identifier in a provider table.
///
/// Single-symbol responses use flat string keys ("Adj Close"). Multi-symbol
/// batch responses key every column by (field, symbol), which serializes as a
/// two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColumnKey {
    Flat(String),
    Compound(String, String),
}

/// How price columns are addressed in a given response, decided once by
/// inspecting the column structure and then used uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnShape {
    Flat,
    Compound,
}

impl HistoryResponse {
    fn shape(&self) -> ColumnShape {
        if self
            .columns
            .iter()
            .any(|c| matches!(c, ColumnKey::Compound(_, _)))
        {
            ColumnShape::Compound
        } else {
            ColumnShape::Flat
        }
    }

    /// Finds the index of `field` for `symbol` under the detected shape.
    fn find_column(&self, shape: ColumnShape, field: &str, symbol: &str) -> Option<usize> {
        self.columns.iter().position(|c| match (shape, c) {
            (ColumnShape::Flat, ColumnKey::Flat(name)) => name == field,
            (ColumnShape::Compound, ColumnKey::Compound(name, sym)) => {
                name == field && sym == symbol
            }
            _ => false,
        })
    }

    /// Resolves the usable price column for `symbol`: "Adj Close" preferred,
    /// "Close" as fallback.
    fn resolve_price_column(&self, symbol: &str) -> Result<usize, MarketDataError> {
        let shape = self.shape();
        PRICE_FIELDS
            .iter()
            .find_map(|field| self.find_column(shape, field, symbol))
            .ok_or_else(|| MarketDataError::NoPriceColumn(symbol.to_string()))
    }

    /// Normalizes this response into a canonical daily price series for `symbol`.
    ///
    /// Timestamps are interpreted as UTC and collapsed to naive calendar
    /// dates. When several rows collapse to the same date, the last one wins.
    /// Null price cells are skipped.
    pub fn into_price_series(self, symbol: &str) -> Result<PriceSeries, MarketDataError> {
        if self.index.is_empty() {
            return Err(MarketDataError::EmptySeries(symbol.to_string()));
        }
        if self.index.len() != self.data.len() {
            return Err(MarketDataError::InvalidData(format!(
                "index has {} entries but data has {} rows",
                self.index.len(),
                self.data.len()
            )));
        }

        let column = self.resolve_price_column(symbol)?;

        let mut dated: Vec<(NaiveDate, Decimal)> = Vec::with_capacity(self.index.len());
        for (ts, row) in self.index.iter().zip(&self.data) {
            let date = Utc
                .timestamp_millis_opt(*ts)
                .single()
                .ok_or_else(|| MarketDataError::InvalidData(format!("invalid timestamp: {ts}")))?
                .date_naive();

            let Some(Some(value)) = row.get(column) else {
                continue;
            };
            let price = Decimal::from_f64(*value).ok_or_else(|| {
                MarketDataError::InvalidData(format!("unrepresentable price on {date}: {value}"))
            })?;
            dated.push((date, price));
        }

        if dated.is_empty() {
            return Err(MarketDataError::EmptySeries(symbol.to_string()));
        }

        // Collapse duplicate calendar dates, keeping the last observation.
        dated.sort_by_key(|(date, _)| *date);
        let mut points: Vec<PricePoint> = Vec::with_capacity(dated.len());
        for (date, price) in dated {
            match points.last_mut() {
                Some(last) if last.date == date => {
                    tracing::debug!(%symbol, %date, "duplicate calendar date, keeping last row");
                    last.price = price;
                }
                _ => points.push(PricePoint { date, price }),
            }
        }

        PriceSeries::new(points).map_err(|e| MarketDataError::InvalidData(e.to_string()))
    }
}
