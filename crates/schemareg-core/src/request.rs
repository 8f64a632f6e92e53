//! Transport-neutral admin API request/response types.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SchemaRegistryError;

/// HTTP method used by an admin call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A request against the admin API, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminRequest {
    pub method: Method,
    /// Path below the base URL, always starting with `/`.
    pub path: String,
    /// Query parameters, in the order they should be sent.
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl AdminRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Append a query parameter if `value` is present.
    pub fn with_query_opt(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(v) = value {
            self.query.push((key.to_string(), v.to_string()));
        }
        self
    }
}

/// A response from the admin API.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminResponse {
    pub status: u16,
    /// Decoded JSON body; `Value::Null` when the body was empty.
    pub body: Value,
}

impl AdminResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Decode the body into `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, SchemaRegistryError> {
        serde_json::from_value(self.body).map_err(|e| SchemaRegistryError::MalformedResponse {
            reason: e.to_string(),
        })
    }
}
