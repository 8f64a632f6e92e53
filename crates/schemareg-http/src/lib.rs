//! schemareg-http — admin API transport backed by `reqwest`.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use schemareg_core::SchemaRegistryClient;
//! use schemareg_http::{AdminConfig, HttpAdminTransport};
//!
//! # fn build() -> Result<(), schemareg_core::TransportError> {
//! let config = AdminConfig::new("http://localhost:8021").with_api_key("secret");
//! let client = SchemaRegistryClient::new(Arc::new(HttpAdminTransport::new(config)?));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;

pub use client::HttpAdminTransport;
pub use config::AdminConfig;
