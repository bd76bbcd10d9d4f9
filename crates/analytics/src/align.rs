use crate::error::AnalyticsError;
use core_types::{AlignedPair, ReturnSeries};
use std::collections::HashMap;

/// Restricts two return series to the intersection of their dates.
///
/// Both outputs have identical length and identical, ascending date
/// sequences. An empty intersection is `NoOverlap`, which callers surface as
/// a reportable condition rather than a fault.
pub fn align(a: &ReturnSeries, b: &ReturnSeries) -> Result<AlignedPair, AnalyticsError> {
    let b_by_date: HashMap<_, _> = b.points().iter().map(|p| (p.date, *p)).collect();

    let mut a_common = Vec::new();
    let mut b_common = Vec::new();
    // Iterating `a` in order keeps the intersection ascending.
    for point in a.points() {
        if let Some(matching) = b_by_date.get(&point.date) {
            a_common.push(*point);
            b_common.push(*matching);
        }
    }

    if a_common.is_empty() {
        return Err(AnalyticsError::NoOverlap);
    }

    let instrument =
        ReturnSeries::new(a_common).map_err(|e| AnalyticsError::InternalError(e.to_string()))?;
    let benchmark =
        ReturnSeries::new(b_common).map_err(|e| AnalyticsError::InternalError(e.to_string()))?;

    AlignedPair::new(instrument, benchmark)
        .map_err(|e| AnalyticsError::InternalError(e.to_string()))
}
