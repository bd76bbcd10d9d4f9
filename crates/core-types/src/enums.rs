use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the first element of a return series (which has no prior price) is handled.
///
/// `Drop` omits it, producing a series one element shorter than the price
/// series. `Zero` keeps it with a value of 0.0, preserving the length. The
/// report pipeline uses `Drop` for two-series comparisons and `Zero` for
/// single-series display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NanPolicy {
    Drop,
    Zero,
}

/// The level of detail requested for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTier {
    /// Structured metrics only, no rendered payload.
    Basic,
    /// A rendered tearsheet document.
    Full,
    /// A rendered tearsheet with per-day cumulative return and drawdown detail.
    Detailed,
}

impl ReportTier {
    /// Whether this tier requires the external renderer collaborator.
    pub fn is_rendered(&self) -> bool {
        !matches!(self, ReportTier::Basic)
    }
}

impl fmt::Display for ReportTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportTier::Basic => write!(f, "basic"),
            ReportTier::Full => write!(f, "full"),
            ReportTier::Detailed => write!(f, "detailed"),
        }
    }
}

impl FromStr for ReportTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(ReportTier::Basic),
            "full" => Ok(ReportTier::Full),
            "detailed" => Ok(ReportTier::Detailed),
            other => Err(format!(
                "unknown report tier '{other}' (expected basic, full or detailed)"
            )),
        }
    }
}
