//! Admin API transport backed by `reqwest`.
//!
//! Every request carries the headers from [`AdminConfig`]. Non-2xx answers
//! become [`TransportError::Status`]; 2xx answers are handed back with their
//! status so callers can tell 200 from 201/202/204. No retries are attempted.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use schemareg_core::error::TransportError;
use schemareg_core::request::{AdminRequest, AdminResponse, Method};
use schemareg_core::transport::AdminTransport;

use crate::config::AdminConfig;

const API_KEY_HEADER: &str = "x-api-key";

/// HTTP transport for the ledger agent's admin API.
pub struct HttpAdminTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAdminTransport {
    /// Build a transport from the request configuration.
    pub fn new(config: AdminConfig) -> Result<Self, TransportError> {
        let base_url = config.admin_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(TransportError::InvalidConfig("admin URL is empty".into()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .default_headers(default_headers(&config)?)
            .build()
            .map_err(|e| TransportError::InvalidConfig(e.to_string()))?;

        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn default_headers(config: &AdminConfig) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        headers.insert(header_name(name)?, header_value(value)?);
    }
    if let Some(key) = &config.api_key {
        headers.insert(HeaderName::from_static(API_KEY_HEADER), header_value(key)?);
    }
    if let Some(token) = &config.bearer_token {
        let mut value = header_value(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

fn header_name(name: &str) -> Result<HeaderName, TransportError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| TransportError::InvalidConfig(format!("header name {name:?}: {e}")))
}

fn header_value(value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value)
        .map_err(|e| TransportError::InvalidConfig(format!("header value: {e}")))
}

/// Empty bodies become `Null`; bodies that are not JSON are kept as a string.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[async_trait]
impl AdminTransport for HttpAdminTransport {
    async fn send(&self, req: AdminRequest) -> Result<AdminResponse, TransportError> {
        let url = self.endpoint(&req.path);
        tracing::debug!(method = %req.method, url = %url, "admin request");

        let mut builder = match req.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(error = %e, url = %url, "failed to read error response body");
                    format!("<unreadable body: {e}>")
                }
            };
            tracing::debug!(status = status.as_u16(), url = %url, "admin request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;
        Ok(AdminResponse::new(status.as_u16(), decode_body(&bytes)))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
