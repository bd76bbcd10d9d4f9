use crate::error::AnalyticsError;
use core_types::{NanPolicy, PriceSeries, ReturnPoint, ReturnSeries};
use rust_decimal::prelude::ToPrimitive;

/// Converts a price series into a daily simple-return series.
///
/// For index i >= 1, `r[i] = price[i] / price[i-1] - 1`. The first element has
/// no prior price: `NanPolicy::Drop` omits it (output length n-1),
/// `NanPolicy::Zero` keeps it at 0.0 (output length n).
pub fn to_returns(
    prices: &PriceSeries,
    policy: NanPolicy,
) -> Result<ReturnSeries, AnalyticsError> {
    if prices.len() < 2 {
        return Err(AnalyticsError::DegenerateSeries(prices.len()));
    }

    let points = prices.points();
    let mut out = Vec::with_capacity(points.len());

    if policy == NanPolicy::Zero {
        out.push(ReturnPoint {
            date: points[0].date,
            value: 0.0,
        });
    }

    for window in points.windows(2) {
        let prev = decimal_to_f64(window[0].price)?;
        let current = decimal_to_f64(window[1].price)?;
        out.push(ReturnPoint {
            date: window[1].date,
            value: current / prev - 1.0,
        });
    }

    ReturnSeries::new(out).map_err(|e| AnalyticsError::InternalError(e.to_string()))
}

fn decimal_to_f64(value: rust_decimal::Decimal) -> Result<f64, AnalyticsError> {
    value
        .to_f64()
        .ok_or_else(|| AnalyticsError::InternalError(format!("price {value} is not representable")))
}
