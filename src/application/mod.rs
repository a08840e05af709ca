// src/application/mod.rs
pub mod controller;
pub mod market_data;
pub mod state;

pub use controller::{Action, DashboardController, UserPrompt};
pub use market_data::MarketDataService;
pub use state::{DashboardState, ProductForm};
