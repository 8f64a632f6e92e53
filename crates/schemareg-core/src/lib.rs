//! schemareg-core — types, transport seam and cache for the schema registry client.
//!
//! # Overview
//!
//! The registry client talks to a ledger agent's admin API to publish and
//! fetch credential schemas and to accept the ledger's Transaction Authors
//! Agreement. The core crate defines:
//!
//! - [`AdminTransport`] — the async trait every admin API transport implements
//! - [`AdminRequest`] / [`AdminResponse`] — transport-neutral wire types
//! - [`SchemaRecord`] / [`SchemaDefinition`] — schema payloads
//! - [`RegistryCache`] — the in-process cache of known schemas
//! - [`SchemaRegistryClient`] — the four admin operations plus cache updates
//! - [`RegistrySlot`] — initialise-once holder for a shared client

pub mod cache;
pub mod client;
pub mod error;
pub mod request;
pub mod schema;
pub mod transport;

pub use cache::{RegistryCache, SchemaSet};
pub use client::{RegistrySlot, SchemaRegistryClient};
pub use error::{SchemaRegistryError, TransportError};
pub use request::{AdminRequest, AdminResponse, Method};
pub use schema::{SchemaDefinition, SchemaDescriptor, SchemaIdsResponse, SchemaRecord, TaaAcceptance};
pub use transport::AdminTransport;
