// src/infrastructure/market/mod.rs
// HTTP implementations of the market data feeds

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::errors::{MarketDataError, MarketDataResult};
use crate::domain::models::InflationSample;
use crate::domain::repository::{ExchangeRateSource, InflationSource};
use crate::infrastructure::http::HttpClient;

const DOLAR_API_MEP_URL: &str = "https://dolarapi.com/v1/dolares/mep";
const ARGENTINA_DATOS_BASE_URL: &str = "https://api.argentinadatos.com";
const MEP_QUOTE_PATH: &str = "/v1/cotizaciones/dolar/mep";
const INFLATION_PATH: &str = "/v1/indices/inflacion";

/// Quote payload shared by both dollar feeds; only the sell side is used.
#[derive(Debug, Deserialize)]
struct QuotePayload {
    venta: Option<Decimal>,
}

/// One month of the inflation index. Dates are parsed leniently; an
/// unreadable `fecha` leaves the entry usable but undated.
#[derive(Debug, Deserialize)]
struct InflationEntry {
    #[serde(default)]
    fecha: Option<String>,
    valor: Option<Decimal>,
}

impl InflationEntry {
    fn period(&self) -> Option<NaiveDate> {
        self.fecha
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }
}

/// Primary MEP quote feed (dolarapi.com).
pub struct DolarApiSource {
    client: HttpClient,
    url: String,
}

impl DolarApiSource {
    pub fn new(client: HttpClient) -> Self {
        Self::with_endpoint(client, DOLAR_API_MEP_URL)
    }

    pub fn with_endpoint(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ExchangeRateSource for DolarApiSource {
    fn name(&self) -> &str {
        "dolarapi.com"
    }

    async fn sell_rate(&self) -> MarketDataResult<Decimal> {
        let quote: QuotePayload = self.client.get_json(&self.url).await?;
        quote.venta.ok_or(MarketDataError::MissingField("venta"))
    }
}

/// argentinadatos.com serves both the backup MEP quote and the monthly
/// inflation index, so one source implements both feed traits.
pub struct ArgentinaDatosSource {
    client: HttpClient,
    base_url: String,
}

impl ArgentinaDatosSource {
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, ARGENTINA_DATOS_BASE_URL)
    }

    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ExchangeRateSource for ArgentinaDatosSource {
    fn name(&self) -> &str {
        "argentinadatos.com"
    }

    async fn sell_rate(&self) -> MarketDataResult<Decimal> {
        let url = format!("{}{}", self.base_url, MEP_QUOTE_PATH);
        let quote: QuotePayload = self.client.get_json(&url).await?;
        quote.venta.ok_or(MarketDataError::MissingField("venta"))
    }
}

#[async_trait]
impl InflationSource for ArgentinaDatosSource {
    fn name(&self) -> &str {
        "argentinadatos.com"
    }

    async fn latest_monthly(&self) -> MarketDataResult<InflationSample> {
        let url = format!("{}{}", self.base_url, INFLATION_PATH);
        let series: Vec<InflationEntry> = self.client.get_json(&url).await?;
        latest_sample(series)
    }
}

/// The feed appends months chronologically, so the last entry should be
/// the newest. Verified against the dates when they are present: if some
/// other entry is dated newer, it wins and the surprise is logged.
fn latest_sample(series: Vec<InflationEntry>) -> MarketDataResult<InflationSample> {
    if series.is_empty() {
        return Err(MarketDataError::EmptySeries("inflation index".to_string()));
    }

    let last_index = series.len() - 1;
    let newest_dated = series
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| entry.period().map(|date| (i, date)))
        .max_by_key(|&(_, date)| date);

    let pick = match newest_dated {
        Some((i, date)) if i != last_index => {
            log::warn!(
                "Inflation series is not date-ordered; using the {} entry instead of the last one",
                date
            );
            i
        }
        _ => last_index,
    };

    let entry = &series[pick];
    let monthly_pct = entry.valor.ok_or(MarketDataError::MissingField("valor"))?;
    Ok(InflationSample {
        monthly_pct,
        period: entry.period(),
    })
}
