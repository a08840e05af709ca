// src/domain/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Implement From for common error types
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::Unknown(s)
    }
}

/// Failures while fetching the exchange rate or the inflation index.
/// None of these are fatal; callers fall back to hardcoded constants.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing field `{0}` in response")]
    MissingField(&'static str),

    #[error("Empty series from {0}")]
    EmptySeries(String),
}

/// Failures talking to the product store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Store rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type MarketDataResult<T> = Result<T, MarketDataError>;
pub type StoreResult<T> = Result<T, StoreError>;
