// src/application/market_data.rs
// Rate and inflation retrieval with fixed fallbacks

use std::sync::Arc;

use crate::domain::models::{InflationReading, QuoteSource, RateQuote};
use crate::domain::repository::{ExchangeRateSource, InflationSource};

/// Fetches the market references, masking every failure behind the
/// hardcoded defaults. Returned values carry their provenance so callers
/// can tell live data from a fallback.
pub struct MarketDataService {
    primary: Arc<dyn ExchangeRateSource + Send + Sync>,
    secondary: Arc<dyn ExchangeRateSource + Send + Sync>,
    inflation: Arc<dyn InflationSource + Send + Sync>,
}

impl MarketDataService {
    pub fn new(
        primary: Arc<dyn ExchangeRateSource + Send + Sync>,
        secondary: Arc<dyn ExchangeRateSource + Send + Sync>,
        inflation: Arc<dyn InflationSource + Send + Sync>,
    ) -> Self {
        Self {
            primary,
            secondary,
            inflation,
        }
    }

    /// Primary feed, then the backup feed, then the hardcoded rate.
    /// Never fails; degraded tiers are logged and tagged.
    pub async fn fetch_rate(&self) -> RateQuote {
        match self.primary.sell_rate().await {
            Ok(sell) => RateQuote {
                sell,
                source: QuoteSource::Primary,
            },
            Err(e) => {
                log::warn!("{} failed, trying backup: {}", self.primary.name(), e);
                match self.secondary.sell_rate().await {
                    Ok(sell) => RateQuote {
                        sell,
                        source: QuoteSource::Secondary,
                    },
                    Err(e) => {
                        log::warn!(
                            "{} failed, using fallback rate: {}",
                            self.secondary.name(),
                            e
                        );
                        RateQuote::fallback()
                    }
                }
            }
        }
    }

    /// Single feed; the hardcoded percentage covers any failure.
    pub async fn fetch_inflation(&self) -> InflationReading {
        match self.inflation.latest_monthly().await {
            Ok(sample) => InflationReading {
                monthly_pct: sample.monthly_pct,
                period: sample.period,
                source: QuoteSource::Primary,
            },
            Err(e) => {
                log::warn!(
                    "{} failed, using fallback inflation: {}",
                    self.inflation.name(),
                    e
                );
                InflationReading::fallback()
            }
        }
    }
}
