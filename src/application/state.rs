// src/application/state.rs
// The dashboard's single mutable state container

use rust_decimal::Decimal;

use crate::domain::models::{
    InflationReading, Product, QuoteSource, RateQuote, DEFAULT_MARGIN_PCT, DEFAULT_MEP_SELL,
};

/// Raw text the user typed into the add-product form. Parsed only on
/// submit and kept verbatim when a submit fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub cost: String,
}

impl ProductForm {
    pub fn clear(&mut self) {
        self.name.clear();
        self.cost.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.cost.is_empty()
    }
}

/// All mutable session state. Mutated only through the controller's
/// dispatch entry point; rendered values are always derived live from it.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub rate: RateQuote,
    pub inflation: InflationReading,
    pub margin_pct: Decimal,
    pub form: ProductForm,
    pub products: Vec<Product>,
    /// True while an insert round-trip is in flight; further submits are
    /// ignored until it clears. Deletes are not gated.
    pub saving: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            rate: RateQuote {
                sell: DEFAULT_MEP_SELL,
                source: QuoteSource::Fallback,
            },
            inflation: InflationReading {
                monthly_pct: Decimal::ZERO,
                period: None,
                source: QuoteSource::Fallback,
            },
            margin_pct: DEFAULT_MARGIN_PCT,
            form: ProductForm::default(),
            products: Vec::new(),
            saving: false,
        }
    }
}
