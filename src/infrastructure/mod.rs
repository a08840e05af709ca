// src/infrastructure/mod.rs
pub mod http;
pub mod market;
pub mod store;

pub use http::HttpClient;
pub use market::{ArgentinaDatosSource, DolarApiSource};
pub use store::SupabaseProductStore;
