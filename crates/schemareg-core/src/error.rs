//! Error types for the admin transport and the registry client.

use thiserror::Error;

/// Errors that can occur while talking to the admin API.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The admin API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request configuration could not be turned into a request
    /// (bad header name, unusable base URL, ...).
    #[error("Invalid request configuration: {0}")]
    InvalidConfig(String),

    /// Response body could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// An unexpected error.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns the HTTP status if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors returned by [`SchemaRegistryClient`](crate::SchemaRegistryClient)
/// and [`RegistrySlot`](crate::RegistrySlot).
#[derive(Debug, Error)]
pub enum SchemaRegistryError {
    /// The shared client was requested for the first time without a transport.
    #[error("Error creating the schema registry client: no admin transport was provided")]
    UninitializedContext,

    /// The ledger has no schema with this identifier.
    #[error(
        "Schema with id {id} was not found on the ledger, the application will NOT be able to issue credentials for it"
    )]
    SchemaNotFound { id: String },

    /// The admin API answered 2xx with a body of the wrong shape.
    #[error("Malformed admin API response: {reason}")]
    MalformedResponse { reason: String },

    /// Transport failure, passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SchemaRegistryError {
    /// Returns `true` if the error means the identifier cannot be used to
    /// issue credentials.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SchemaNotFound { .. })
    }
}
