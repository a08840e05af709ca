// src/domain/repository/mod.rs
// Port interfaces for the product store and the market data feeds

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::errors::{MarketDataResult, StoreResult};
use crate::domain::models::{InflationSample, NewProduct, Product};

/// Repository interface for the persisted product collection
#[async_trait]
pub trait ProductRepository {
    async fn list(&self) -> StoreResult<Vec<Product>>;
    async fn insert(&self, product: NewProduct) -> StoreResult<()>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// A feed that quotes the reference dollar's sell rate
#[async_trait]
pub trait ExchangeRateSource {
    /// Short identifier used in logs when the source fails.
    fn name(&self) -> &str;
    async fn sell_rate(&self) -> MarketDataResult<Decimal>;
}

/// A feed that reports the latest monthly inflation percentage
#[async_trait]
pub trait InflationSource {
    fn name(&self) -> &str;
    async fn latest_monthly(&self) -> MarketDataResult<InflationSample>;
}
