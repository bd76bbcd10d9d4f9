use serde::{Deserialize, Serialize};

/// How a metric value should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    Percent,
    Ratio,
    Raw,
}

/// The mandated metric catalog.
///
/// Order matters: reports present metrics in `Metric::CATALOG` order. The
/// catalog is benchmark-independent; comparative metrics (beta, alpha) may be
/// appended later but these entries must remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    TotalReturn,
    AnnualizedVolatility,
    SharpeRatio,
    MaxDrawdown,
    WinRate,
    ValueAtRisk,
    RiskOfRuin,
    ExpectedReturnMonthly,
    BestDay,
    WorstDay,
}

impl Metric {
    pub const CATALOG: [Metric; 10] = [
        Metric::TotalReturn,
        Metric::AnnualizedVolatility,
        Metric::SharpeRatio,
        Metric::MaxDrawdown,
        Metric::WinRate,
        Metric::ValueAtRisk,
        Metric::RiskOfRuin,
        Metric::ExpectedReturnMonthly,
        Metric::BestDay,
        Metric::WorstDay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::TotalReturn => "Total Return",
            Metric::AnnualizedVolatility => "Annualized Volatility",
            Metric::SharpeRatio => "Sharpe Ratio",
            Metric::MaxDrawdown => "Max Drawdown",
            Metric::WinRate => "Win Rate",
            Metric::ValueAtRisk => "Value at Risk",
            Metric::RiskOfRuin => "Risk of Ruin",
            Metric::ExpectedReturnMonthly => "Expected Return (Monthly)",
            Metric::BestDay => "Best Day",
            Metric::WorstDay => "Worst Day",
        }
    }

    pub fn display_format(&self) -> DisplayFormat {
        match self {
            Metric::SharpeRatio => DisplayFormat::Ratio,
            _ => DisplayFormat::Percent,
        }
    }
}

/// A computed metric value, or a marker for a metric whose inputs were
/// degenerate. One unmetric-able statistic never fails the whole report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
    Value(f64),
    NotComputable,
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Value(v) => Some(*v),
            MetricValue::NotComputable => None,
        }
    }
}

/// One row of a metrics report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    pub metric: Metric,
    pub value: MetricValue,
}

impl MetricEntry {
    /// Human-readable rendering of the value, honoring the display format.
    pub fn formatted_value(&self) -> String {
        match (self.value, self.metric.display_format()) {
            (MetricValue::NotComputable, _) => "n/a".to_string(),
            (MetricValue::Value(v), DisplayFormat::Percent) => format!("{:.2}%", v * 100.0),
            (MetricValue::Value(v), DisplayFormat::Ratio) => format!("{v:.2}"),
            (MetricValue::Value(v), DisplayFormat::Raw) => format!("{v}"),
        }
    }
}

/// The ordered, structured output of the `MetricsEngine`.
///
/// Every metric in `Metric::CATALOG` is always present, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    entries: Vec<MetricEntry>,
}

impl MetricsReport {
    pub(crate) fn from_entries(entries: Vec<MetricEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MetricEntry] {
        &self.entries
    }

    pub fn get(&self, metric: Metric) -> Option<MetricValue> {
        self.entries
            .iter()
            .find(|e| e.metric == metric)
            .map(|e| e.value)
    }
}
