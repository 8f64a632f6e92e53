//! The schema registry client: admin API calls plus cache bookkeeping.

use std::sync::{Arc, OnceLock};

use serde::Serialize;
use serde_json::Value;

use crate::cache::RegistryCache;
use crate::error::{SchemaRegistryError, TransportError};
use crate::request::AdminRequest;
use crate::schema::{SchemaDefinition, SchemaIdsResponse, SchemaRecord, TaaAcceptance};
use crate::transport::AdminTransport;

const TAA_ACCEPT_PATH: &str = "/ledger/taa/accept";
const SCHEMAS_PATH: &str = "/schemas";
const SCHEMAS_CREATED_PATH: &str = "/schemas/created";

/// Client for the ledger agent's schema endpoints.
///
/// Construct one per process and share it as `Arc<SchemaRegistryClient>`;
/// the cache lives as long as the client does.
pub struct SchemaRegistryClient {
    transport: Arc<dyn AdminTransport>,
    cache: RegistryCache,
    agreement: TaaAcceptance,
}

impl SchemaRegistryClient {
    pub fn new(transport: Arc<dyn AdminTransport>) -> Self {
        Self {
            transport,
            cache: RegistryCache::new(),
            agreement: TaaAcceptance::default(),
        }
    }

    /// Replace the agreement body sent by [`sign_agreement`](Self::sign_agreement).
    pub fn with_agreement(mut self, agreement: TaaAcceptance) -> Self {
        self.agreement = agreement;
        self
    }

    pub fn cache(&self) -> &RegistryCache {
        &self.cache
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Accept the ledger's Transaction Authors Agreement.
    ///
    /// Returns `true` only for an HTTP 200 answer.
    pub async fn sign_agreement(&self) -> Result<bool, SchemaRegistryError> {
        tracing::debug!(
            base_url = %self.transport.base_url(),
            version = %self.agreement.version,
            "signing TAA"
        );
        let body = encode(&self.agreement)?;
        let resp = self
            .transport
            .send(AdminRequest::post(TAA_ACCEPT_PATH, body))
            .await?;
        tracing::debug!(status = resp.status, response = %resp.body, "TAA response");
        Ok(resp.status == 200)
    }

    /// Publish a schema and cache the ledger's answer.
    pub async fn publish_schema(
        &self,
        definition: &SchemaDefinition,
    ) -> Result<SchemaRecord, SchemaRegistryError> {
        let body = encode(definition)?;
        tracing::debug!(schema = %body, "publishing schema to ledger");
        let resp = self
            .transport
            .send(AdminRequest::post(SCHEMAS_PATH, body))
            .await?;
        tracing::debug!(response = %resp.body, "published schema");

        let record: SchemaRecord = resp.json()?;
        let id = record
            .id()
            .ok_or_else(|| SchemaRegistryError::MalformedResponse {
                reason: "published schema carries no identifier".into(),
            })?
            .to_string();
        self.cache
            .store(&id, record.clone(), definition.default, definition.public);
        tracing::info!(
            schema_id = %id,
            default = definition.default,
            public = definition.public,
            "schema published"
        );
        Ok(record)
    }

    /// List identifiers of schemas this agent has published, optionally
    /// filtered by name and version.
    pub async fn fetch_schema_ids(
        &self,
        name: Option<&str>,
        version: Option<&str>,
    ) -> Result<Vec<String>, SchemaRegistryError> {
        let req = AdminRequest::get(SCHEMAS_CREATED_PATH)
            .with_query_opt("schema_name", name)
            .with_query_opt("schema_version", version);
        tracing::debug!(?name, ?version, "fetching created schema ids");
        let resp = self.transport.send(req).await?;
        tracing::debug!(response = %resp.body, "created schema ids");
        Ok(resp.json::<SchemaIdsResponse>()?.schema_ids)
    }

    /// Fetch a schema from the ledger and cache it.
    ///
    /// Fails with [`SchemaRegistryError::SchemaNotFound`] when the answer
    /// carries no schema descriptor; the cache is left untouched then.
    pub async fn fetch_schema(
        &self,
        id: &str,
        mark_default: bool,
        mark_public: bool,
    ) -> Result<SchemaRecord, SchemaRegistryError> {
        tracing::debug!(schema_id = %id, "fetching schema from ledger");
        let resp = self
            .transport
            .send(AdminRequest::get(format!("{SCHEMAS_PATH}/{id}")))
            .await?;

        if resp.body.get("schema").map_or(true, is_absent) {
            tracing::warn!(schema_id = %id, "schema not found on ledger");
            return Err(SchemaRegistryError::SchemaNotFound { id: id.to_string() });
        }

        tracing::debug!(response = %resp.body, "fetched schema");
        let record: SchemaRecord = resp.json()?;
        let key = record.id().unwrap_or(id).to_string();
        self.cache.store(&key, record.clone(), mark_default, mark_public);
        Ok(record)
    }
}

/// `null`, `false`, `""` and `0` all mean the ledger returned no schema.
fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Value, SchemaRegistryError> {
    serde_json::to_value(value).map_err(|e| {
        SchemaRegistryError::Transport(TransportError::Other(format!(
            "failed to encode request body: {e}"
        )))
    })
}

/// Initialise-once holder for a shared [`SchemaRegistryClient`].
///
/// The first [`get`](Self::get) must supply a transport; later calls may pass
/// `None` and receive the same client.
#[derive(Default)]
pub struct RegistrySlot {
    cell: OnceLock<Arc<SchemaRegistryClient>>,
}

impl RegistrySlot {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn get(
        &self,
        transport: Option<Arc<dyn AdminTransport>>,
    ) -> Result<Arc<SchemaRegistryClient>, SchemaRegistryError> {
        if let Some(client) = self.cell.get() {
            return Ok(Arc::clone(client));
        }
        let transport = transport.ok_or(SchemaRegistryError::UninitializedContext)?;
        let client = self.cell.get_or_init(|| {
            tracing::debug!(base_url = %transport.base_url(), "created schema registry client");
            Arc::new(SchemaRegistryClient::new(transport))
        });
        Ok(Arc::clone(client))
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
