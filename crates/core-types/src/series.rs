use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single (date, price) observation on a trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Decimal,
}

/// An ordered daily price history for one instrument.
///
/// Invariants, enforced at construction and immutable afterwards:
/// - every price is strictly positive
/// - dates are strictly increasing (which also rules out duplicates)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, CoreError> {
        for window in points.windows(2) {
            if window[1].date <= window[0].date {
                return Err(CoreError::InvalidInput(
                    "PriceSeries".to_string(),
                    format!(
                        "dates must be strictly increasing ({} follows {})",
                        window[1].date, window[0].date
                    ),
                ));
            }
        }
        if let Some(bad) = points.iter().find(|p| p.price <= Decimal::ZERO) {
            return Err(CoreError::InvalidInput(
                "PriceSeries".to_string(),
                format!("price on {} is not positive: {}", bad.date, bad.price),
            ));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A single (date, simple return) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// An ordered daily simple-return series.
///
/// Invariants, enforced at construction:
/// - dates are strictly increasing
/// - every value is finite (no NaN or infinity is permitted downstream)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    pub fn new(points: Vec<ReturnPoint>) -> Result<Self, CoreError> {
        for window in points.windows(2) {
            if window[1].date <= window[0].date {
                return Err(CoreError::InvalidInput(
                    "ReturnSeries".to_string(),
                    format!(
                        "dates must be strictly increasing ({} follows {})",
                        window[1].date, window[0].date
                    ),
                ));
            }
        }
        if let Some(bad) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(CoreError::InvalidInput(
                "ReturnSeries".to_string(),
                format!("return on {} is not finite: {}", bad.date, bad.value),
            ));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    /// The raw return values, in date order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Two return series restricted to their common dates, index-for-index
/// correspondent.
///
/// Invariant: both series have identical length and an identical date sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    instrument: ReturnSeries,
    benchmark: ReturnSeries,
}

impl AlignedPair {
    pub fn new(instrument: ReturnSeries, benchmark: ReturnSeries) -> Result<Self, CoreError> {
        if instrument.len() != benchmark.len() {
            return Err(CoreError::InvalidInput(
                "AlignedPair".to_string(),
                format!(
                    "length mismatch: instrument has {} points, benchmark has {}",
                    instrument.len(),
                    benchmark.len()
                ),
            ));
        }
        if let Some((a, b)) = instrument
            .points()
            .iter()
            .zip(benchmark.points())
            .find(|(a, b)| a.date != b.date)
        {
            return Err(CoreError::InvalidInput(
                "AlignedPair".to_string(),
                format!("date mismatch: instrument {} vs benchmark {}", a.date, b.date),
            ));
        }
        Ok(Self {
            instrument,
            benchmark,
        })
    }

    pub fn instrument(&self) -> &ReturnSeries {
        &self.instrument
    }

    pub fn benchmark(&self) -> &ReturnSeries {
        &self.benchmark
    }

    pub fn len(&self) -> usize {
        self.instrument.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instrument.is_empty()
    }
}
