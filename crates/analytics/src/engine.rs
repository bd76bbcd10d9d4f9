use crate::constants::{RUIN_UNITS, TRADING_DAYS_PER_MONTH, TRADING_DAYS_PER_YEAR, VAR_TAIL};
use crate::error::AnalyticsError;
use crate::report::{Metric, MetricEntry, MetricValue, MetricsReport};
use core_types::ReturnSeries;

/// A stateless calculator for deriving performance metrics from a daily
/// return series.
#[derive(Debug, Default)]
pub struct MetricsEngine {}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the full metric catalog for `returns`.
    ///
    /// Each metric is computed independently: a degenerate input to one metric
    /// yields `MetricValue::NotComputable` for that slot without affecting the
    /// others. The only wholesale failure is an empty input series.
    ///
    /// `benchmark` is accepted for future comparative metrics (beta, alpha);
    /// the current catalog is benchmark-independent.
    pub fn compute(
        &self,
        returns: &ReturnSeries,
        benchmark: Option<&ReturnSeries>,
    ) -> Result<MetricsReport, AnalyticsError> {
        if returns.is_empty() {
            return Err(AnalyticsError::EmptyInput);
        }
        if benchmark.is_some() {
            tracing::debug!("benchmark series supplied; current catalog does not use it");
        }

        let values = returns.values();
        let entries = Metric::CATALOG
            .iter()
            .map(|&metric| MetricEntry {
                metric,
                value: match compute_metric(metric, &values) {
                    Some(v) => MetricValue::Value(v),
                    None => MetricValue::NotComputable,
                },
            })
            .collect();

        Ok(MetricsReport::from_entries(entries))
    }
}

fn compute_metric(metric: Metric, values: &[f64]) -> Option<f64> {
    match metric {
        Metric::TotalReturn => Some(total_return(values)),
        Metric::AnnualizedVolatility => {
            stdev_sample(values).map(|sd| sd * TRADING_DAYS_PER_YEAR.sqrt())
        }
        Metric::SharpeRatio => sharpe_ratio(values),
        Metric::MaxDrawdown => Some(max_drawdown(values)),
        Metric::WinRate => Some(win_rate(values)),
        Metric::ValueAtRisk => value_at_risk(values),
        Metric::RiskOfRuin => risk_of_ruin(values),
        Metric::ExpectedReturnMonthly => Some(mean(values) * TRADING_DAYS_PER_MONTH),
        Metric::BestDay => values.iter().copied().reduce(f64::max),
        Metric::WorstDay => values.iter().copied().reduce(f64::min),
    }
}

/// Compounded growth: prod(1 + r) - 1.
fn total_return(values: &[f64]) -> f64 {
    values.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator, the pandas default).
/// Undefined for fewer than two observations.
fn stdev_sample(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|r| (r - m).powi(2)).sum::<f64>() / (values.len() as f64 - 1.0);
    Some(variance.sqrt())
}

/// Annualized Sharpe with a zero risk-free rate. A flat series has no risk
/// and no excess return, so its Sharpe is exactly 0, never NaN.
fn sharpe_ratio(values: &[f64]) -> Option<f64> {
    let sd = stdev_sample(values)?;
    if sd == 0.0 {
        return Some(0.0);
    }
    Some(mean(values) / sd * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Largest peak-to-trough decline of the cumulative return curve, as a
/// non-positive fraction.
fn max_drawdown(values: &[f64]) -> f64 {
    let mut cumulative = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut worst = 0.0_f64;
    for r in values {
        cumulative *= 1.0 + r;
        if cumulative > peak {
            peak = cumulative;
        }
        let drawdown = cumulative / peak - 1.0;
        if drawdown < worst {
            worst = drawdown;
        }
    }
    worst
}

fn win_rate(values: &[f64]) -> f64 {
    values.iter().filter(|r| **r > 0.0).count() as f64 / values.len() as f64
}

/// Historical VaR: the nearest-rank 5th percentile of daily returns, signed
/// (a loss is negative).
fn value_at_risk(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let index = ((VAR_TAIL * sorted.len() as f64).floor() as usize).min(sorted.len() - 1);
    Some(sorted[index])
}

/// Gambler's-ruin approximation with a payoff-adjusted edge.
///
/// `edge = win_rate - (1 - win_rate) / payoff` where `payoff` is the mean win
/// over the mean absolute loss. Ruin probability is ((1 - edge)/(1 + edge))
/// raised to `RUIN_UNITS`, clamped to [0, 1]. A series with no winning or no
/// losing day has no defined payoff ratio.
fn risk_of_ruin(values: &[f64]) -> Option<f64> {
    let wins: Vec<f64> = values.iter().copied().filter(|r| *r > 0.0).collect();
    let losses: Vec<f64> = values.iter().copied().filter(|r| *r < 0.0).collect();
    if wins.is_empty() || losses.is_empty() {
        return None;
    }

    let win_rate = wins.len() as f64 / (wins.len() + losses.len()) as f64;
    let payoff = mean(&wins) / mean(&losses).abs();
    let edge = win_rate - (1.0 - win_rate) / payoff;

    if edge <= 0.0 {
        return Some(1.0);
    }
    if edge >= 1.0 {
        return Some(0.0);
    }
    let ratio = (1.0 - edge) / (1.0 + edge);
    Some(ratio.powf(RUIN_UNITS).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::ReturnPoint;

    fn series(values: &[f64]) -> ReturnSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| ReturnPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap(),
                value: *v,
            })
            .collect();
        ReturnSeries::new(points).unwrap()
    }

    fn value(report: &MetricsReport, metric: Metric) -> f64 {
        report.get(metric).unwrap().as_f64().unwrap()
    }

    #[test]
    fn empty_input_fails_wholesale() {
        let err = MetricsEngine::new()
            .compute(&series(&[]), None)
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyInput));
    }

    #[test]
    fn every_catalog_metric_is_present_in_order() {
        let report = MetricsEngine::new()
            .compute(&series(&[0.01, -0.02, 0.03]), None)
            .unwrap();
        let order: Vec<Metric> = report.entries().iter().map(|e| e.metric).collect();
        assert_eq!(order, Metric::CATALOG);
    }

    #[test]
    fn scenario_total_return_and_drawdown() {
        // Prices [100, 110, 99] -> returns [0.10, -0.10].
        let report = MetricsEngine::new()
            .compute(&series(&[0.10, -0.10]), None)
            .unwrap();
        assert!((value(&report, Metric::TotalReturn) + 0.01).abs() < 1e-12);
        assert!((value(&report, Metric::MaxDrawdown) + 0.10).abs() < 1e-12);
    }

    #[test]
    fn constant_zero_series_has_zero_sharpe_and_volatility() {
        let report = MetricsEngine::new()
            .compute(&series(&[0.0, 0.0, 0.0, 0.0]), None)
            .unwrap();
        assert_eq!(value(&report, Metric::SharpeRatio), 0.0);
        assert_eq!(value(&report, Metric::AnnualizedVolatility), 0.0);
        assert_eq!(value(&report, Metric::WinRate), 0.0);
        // No winning or losing day: risk of ruin has no defined payoff.
        assert_eq!(
            report.get(Metric::RiskOfRuin).unwrap(),
            MetricValue::NotComputable
        );
    }

    #[test]
    fn single_observation_degrades_volatility_not_the_report() {
        let report = MetricsEngine::new().compute(&series(&[0.02]), None).unwrap();
        assert_eq!(
            report.get(Metric::AnnualizedVolatility).unwrap(),
            MetricValue::NotComputable
        );
        assert!((value(&report, Metric::TotalReturn) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn win_rate_counts_strictly_positive_days() {
        let report = MetricsEngine::new()
            .compute(&series(&[0.01, 0.0, -0.01, 0.02]), None)
            .unwrap();
        assert!((value(&report, Metric::WinRate) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn value_at_risk_is_the_fifth_percentile() {
        // 20 returns: floor(0.05 * 20) = 1, the second-smallest value.
        let mut values: Vec<f64> = (0..20).map(|i| (i as f64 - 10.0) / 100.0).collect();
        values.rotate_left(7); // order must not matter
        let report = MetricsEngine::new().compute(&series(&values), None).unwrap();
        assert!((value(&report, Metric::ValueAtRisk) + 0.09).abs() < 1e-12);
    }

    #[test]
    fn best_and_worst_day_are_the_extremes() {
        let report = MetricsEngine::new()
            .compute(&series(&[0.01, -0.04, 0.03, -0.02]), None)
            .unwrap();
        assert_eq!(value(&report, Metric::BestDay), 0.03);
        assert_eq!(value(&report, Metric::WorstDay), -0.04);
    }

    #[test]
    fn expected_return_is_monthly_scaled_mean() {
        let report = MetricsEngine::new()
            .compute(&series(&[0.01, 0.03]), None)
            .unwrap();
        assert!((value(&report, Metric::ExpectedReturnMonthly) - 0.02 * 21.0).abs() < 1e-12);
    }

    #[test]
    fn risk_of_ruin_is_a_probability() {
        let values: Vec<f64> = (0..60)
            .map(|i| if i % 3 == 0 { -0.01 } else { 0.012 })
            .collect();
        let report = MetricsEngine::new().compute(&series(&values), None).unwrap();
        let ruin = value(&report, Metric::RiskOfRuin);
        assert!((0.0..=1.0).contains(&ruin));
    }

    #[test]
    fn all_losing_series_reports_ruin_not_computable() {
        let report = MetricsEngine::new()
            .compute(&series(&[-0.01, -0.02, -0.03]), None)
            .unwrap();
        assert_eq!(
            report.get(Metric::RiskOfRuin).unwrap(),
            MetricValue::NotComputable
        );
    }

    #[test]
    fn compute_is_idempotent() {
        let returns = series(&[0.013, -0.021, 0.007, 0.0, -0.004]);
        let engine = MetricsEngine::new();
        let first = engine.compute(&returns, None).unwrap();
        let second = engine.compute(&returns, None).unwrap();
        assert_eq!(first, second);
    }
}
