// src/domain/models.rs
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Initial and fallback sell rate for the MEP dollar, in ARS per USD.
pub const DEFAULT_MEP_SELL: Decimal = dec!(1250);

/// Fallback monthly inflation percentage when the index fetch fails.
pub const DEFAULT_MONTHLY_INFLATION: Decimal = dec!(4.2);

/// Initial global margin percentage.
pub const DEFAULT_MARGIN_PCT: Decimal = dec!(30);

/// Reference-rate label stored alongside every product.
pub const REFERENCE_CURRENCY: &str = "MEP";

/// A product row as persisted by the store. The id is assigned server-side
/// and treated as opaque text; numeric id columns deserialize into it too.
/// Extra columns returned by the store are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub name: String,
    pub cost_base: Decimal,
    pub currency_ref: String,
}

/// Insert payload for a new product; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub cost_base: Decimal,
    pub currency_ref: String,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, cost_base: Decimal) -> Self {
        Self {
            name: name.into(),
            cost_base,
            currency_ref: REFERENCE_CURRENCY.to_string(),
        }
    }
}

/// Where a market value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSource {
    Primary,
    Secondary,
    Fallback,
}

impl fmt::Display for QuoteSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuoteSource::Primary => write!(f, "primary"),
            QuoteSource::Secondary => write!(f, "secondary"),
            QuoteSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Sell rate for the reference dollar, tagged with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateQuote {
    pub sell: Decimal,
    pub source: QuoteSource,
}

impl RateQuote {
    pub fn fallback() -> Self {
        Self {
            sell: DEFAULT_MEP_SELL,
            source: QuoteSource::Fallback,
        }
    }

    pub fn is_live(&self) -> bool {
        self.source != QuoteSource::Fallback
    }
}

/// One point of the inflation index as reported by a feed, before the
/// fallback chain tags it with a provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationSample {
    pub monthly_pct: Decimal,
    pub period: Option<NaiveDate>,
}

/// Latest monthly inflation percentage, tagged with its provenance.
/// The period is the month the index refers to, when the feed provides it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationReading {
    pub monthly_pct: Decimal,
    pub period: Option<NaiveDate>,
    pub source: QuoteSource,
}

impl InflationReading {
    pub fn fallback() -> Self {
        Self {
            monthly_pct: DEFAULT_MONTHLY_INFLATION,
            period: None,
            source: QuoteSource::Fallback,
        }
    }

    pub fn is_live(&self) -> bool {
        self.source != QuoteSource::Fallback
    }
}

fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
