// src/infrastructure/http.rs
// Shared hyper client for the public feeds and the store

use hyper::body::Bytes;
use hyper::client::HttpConnector;
use hyper::{Body, Client, Request, StatusCode, Uri};
use hyper_tls::HttpsConnector;
use serde::de::DeserializeOwned;

use crate::domain::errors::{MarketDataError, MarketDataResult};

/// Thin wrapper around one connection-pooling hyper client. Cloning is
/// cheap and shares the pool. No timeouts are set; the transport's
/// defaults apply.
#[derive(Clone)]
pub struct HttpClient {
    inner: Client<HttpsConnector<HttpConnector>>,
}

impl HttpClient {
    pub fn new() -> Self {
        let https = HttpsConnector::new();
        Self {
            inner: Client::builder().build::<_, Body>(https),
        }
    }

    /// Sends a prepared request and collects the whole response body.
    pub async fn send(&self, req: Request<Body>) -> Result<(StatusCode, Bytes), hyper::Error> {
        let resp = self.inner.request(req).await?;
        let status = resp.status();
        let body = hyper::body::to_bytes(resp.into_body()).await?;
        Ok((status, body))
    }

    /// GETs the url and decodes a JSON body. Non-2xx statuses and decode
    /// failures are errors; the feeds' fallback chains absorb them.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> MarketDataResult<T> {
        let uri: Uri = url
            .parse()
            .map_err(|e: hyper::http::uri::InvalidUri| MarketDataError::Network(e.to_string()))?;
        let resp = self
            .inner
            .get(uri)
            .await
            .map_err(|e| MarketDataError::Network(e.to_string()))?;
        let status = resp.status();
        let body = hyper::body::to_bytes(resp.into_body())
            .await
            .map_err(|e| MarketDataError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| MarketDataError::MalformedResponse(e.to_string()))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
