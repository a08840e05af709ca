// src/infrastructure/store/mod.rs
// Supabase-backed product repository

use async_trait::async_trait;
use hyper::body::Bytes;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Body, Method, Request, StatusCode};

use crate::config::StoreConfig;
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::models::{NewProduct, Product};
use crate::domain::repository::ProductRepository;
use crate::infrastructure::http::HttpClient;

const PRODUCTS_TABLE: &str = "products";

/// Talks to Supabase's PostgREST table API. Credentials come straight
/// from the environment; empty ones are passed through and every call
/// then fails like any other rejected request.
pub struct SupabaseProductStore {
    client: HttpClient,
    base_url: String,
    anon_key: String,
}

impl SupabaseProductStore {
    pub fn new(client: HttpClient, config: &StoreConfig) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        }
    }

    fn table_url(&self, suffix: &str) -> String {
        format!("{}/rest/v1/{}{}", self.base_url, PRODUCTS_TABLE, suffix)
    }

    fn authed(&self, method: Method, url: &str) -> hyper::http::request::Builder {
        Request::builder()
            .method(method)
            .uri(url)
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
    }

    async fn send(&self, req: Request<Body>) -> StoreResult<(StatusCode, Bytes)> {
        self.client
            .send(req)
            .await
            .map_err(|e| StoreError::Request(e.to_string()))
    }
}

fn rejected(status: StatusCode, body: &Bytes) -> StoreError {
    StoreError::Rejected {
        status: status.as_u16(),
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

#[async_trait]
impl ProductRepository for SupabaseProductStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let url = self.table_url("?select=*");
        let req = self
            .authed(Method::GET, &url)
            .body(Body::empty())
            .map_err(|e| StoreError::Request(e.to_string()))?;
        let (status, body) = self.send(req).await?;

        if !status.is_success() {
            return Err(rejected(status, &body));
        }
        serde_json::from_slice(&body).map_err(|e| StoreError::MalformedResponse(e.to_string()))
    }

    async fn insert(&self, product: NewProduct) -> StoreResult<()> {
        let url = self.table_url("");
        // PostgREST accepts a row array; one-element arrays keep the
        // payload shape uniform.
        let payload =
            serde_json::to_vec(&[product]).map_err(|e| StoreError::Request(e.to_string()))?;
        let req = self
            .authed(Method::POST, &url)
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=minimal")
            .body(Body::from(payload))
            .map_err(|e| StoreError::Request(e.to_string()))?;
        let (status, body) = self.send(req).await?;

        match status {
            StatusCode::CREATED => Ok(()),
            StatusCode::UNAUTHORIZED => Err(StoreError::Rejected {
                status: status.as_u16(),
                body: "unauthorized, check SUPABASE_URL and SUPABASE_ANON_KEY".to_string(),
            }),
            status => Err(rejected(status, &body)),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let url = self.table_url(&format!("?id=eq.{}", id));
        let req = self
            .authed(Method::DELETE, &url)
            .body(Body::empty())
            .map_err(|e| StoreError::Request(e.to_string()))?;
        let (status, body) = self.send(req).await?;

        if status.is_success() {
            Ok(())
        } else {
            Err(rejected(status, &body))
        }
    }
}
