//! # HTTP Transport
//!
//! `Transport` over reqwest.
//!
//! ## URL Building
//! ```text
//! base_url  https://shop.example.com/api/
//! path      /product/65f0 c2
//! query     [("page","2"), ("name","linen")]
//!           │
//!           ▼
//! https://shop.example.com/api/product/65f0%20c2?page=2&name=linen
//! ```
//!
//! Path segments are appended to the base path (never replacing it) and
//! percent-encoded one by one.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use vitrine_core::Failure;

use crate::config::ApiSettings;
use crate::error::{ClientError, ClientResult};
use crate::transport::{Method, Transport, TransportRequest, TransportResponse};

/// reqwest-backed transport rooted at the API base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url) -> ClientResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }
        let client = Client::builder().build()?;
        Ok(HttpTransport { client, base_url })
    }

    pub fn from_settings(settings: &ApiSettings) -> ClientResult<Self> {
        Self::new(Url::parse(&settings.base_url)?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a request path and query against the base URL.
    pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, Failure> {
        let url = self.endpoint(&request.path, &request.query);
        debug!(method = %request.method, %url, "HTTP request");

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(request_failure)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(request_failure)?;

        Ok(TransportResponse::new(status, decode_body(&bytes)))
    }
}

fn request_failure(err: reqwest::Error) -> Failure {
    warn!(error = %err, "HTTP request failed");
    let kind = if err.is_connect() {
        Some("connection refused".to_string())
    } else if err.is_timeout() {
        Some("timed out".to_string())
    } else {
        None
    };
    Failure {
        message: Some(err.to_string()),
        error: kind,
    }
}

/// Empty bodies become `Null`; non-JSON bodies are kept as a string.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
