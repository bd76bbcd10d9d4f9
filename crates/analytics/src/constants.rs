//! Shared constants for metric calculations.

/// Trading days per year, used to annualize daily statistics.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Trading days per month, used to scale a daily mean to a monthly figure.
pub const TRADING_DAYS_PER_MONTH: f64 = 21.0;

/// Tail probability for historical value-at-risk (the 5th percentile).
pub const VAR_TAIL: f64 = 0.05;

/// Capital units for the gambler's-ruin approximation: ruin means losing
/// 100 consecutive risk units of capital.
pub const RUIN_UNITS: f64 = 100.0;
