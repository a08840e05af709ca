// src/domain/mod.rs
pub mod errors;
pub mod models;
pub mod pricing;
pub mod repository;

// Re-export common types for convenience
pub use errors::{AppError, AppResult, MarketDataError, MarketDataResult, StoreError, StoreResult};
pub use models::{
    InflationReading, InflationSample, NewProduct, Product, QuoteSource, RateQuote,
    DEFAULT_MARGIN_PCT, DEFAULT_MEP_SELL, DEFAULT_MONTHLY_INFLATION, REFERENCE_CURRENCY,
};
