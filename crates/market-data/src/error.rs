use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The provider returned an error: {0}")]
    Provider(String),

    #[error("The provider returned no rows for '{0}' in the requested range")]
    EmptySeries(String),

    #[error("No usable price column (\"Adj Close\" or \"Close\") for '{0}'")]
    NoPriceColumn(String),

    #[error("Invalid data from provider: {0}")]
    InvalidData(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
