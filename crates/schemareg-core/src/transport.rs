//! The `AdminTransport` trait — the seam between the registry client and the
//! ledger agent's admin API.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::{AdminRequest, AdminResponse};

/// Async transport for admin API calls.
///
/// Implementations resolve [`AdminRequest::path`] against their own base URL
/// and attach whatever request configuration (headers, auth) they were built
/// with. A response with a non-success status may be reported either as
/// `Err(TransportError::Status { .. })` or as an `AdminResponse`; the client
/// only inspects the status of successful responses.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` for use across Tokio tasks.
///
/// # Object Safety
/// The trait is object-safe and can be stored as `Arc<dyn AdminTransport>`.
#[async_trait]
pub trait AdminTransport: Send + Sync + 'static {
    /// Send a single request and return the response.
    async fn send(&self, req: AdminRequest) -> Result<AdminResponse, TransportError>;

    /// Return the admin base URL this transport talks to.
    fn base_url(&self) -> &str;
}
