use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Not enough data to derive returns: {0} price point(s), need at least 2")]
    DegenerateSeries(usize),

    #[error("No overlapping trading days between the two series")]
    NoOverlap,

    #[error("Cannot compute metrics on an empty return series")]
    EmptyInput,

    #[error("An unexpected error occurred during analytics calculation: {0}")]
    InternalError(String),
}
