//! Schema payloads exchanged with the admin API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mechanism name used when accepting the agreement.
pub const DEFAULT_TAA_MECHANISM: &str = "service_agreement";

/// Agreement version accepted by default.
pub const DEFAULT_TAA_VERSION: &str = "1.1";

/// Sample agreement text published on the VON test network.
pub const DEFAULT_TAA_TEXT: &str = "This is a sample Transaction Authors Agreement **(TAA)**, for the VON test Network.\n\nOn public ledger systems this will typically contain legal constraints that must be accepted before any write operations will be permitted.";

/// A schema submitted for publication.
///
/// `default` and `public` are hints for the local cache. They are sent along
/// with the rest of the definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub schema_name: String,
    pub schema_version: String,
    pub attributes: Vec<String>,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub public: bool,
}

impl SchemaDefinition {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        attributes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            schema_name: name.into(),
            schema_version: version.into(),
            attributes: attributes.into_iter().map(Into::into).collect(),
            default: false,
            public: false,
        }
    }

    /// Mark the schema as the issuer's default.
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    /// Mark the schema as usable without authentication.
    pub fn as_public(mut self) -> Self {
        self.public = true;
        self
    }
}

/// The ledger's description of a published schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(rename = "attrNames", default)]
    pub attr_names: Vec<String>,
    #[serde(rename = "seqNo", default, skip_serializing_if = "Option::is_none")]
    pub seq_no: Option<u64>,
}

/// A schema as returned by the admin API.
///
/// Publishing returns `schema_id` alongside the descriptor; fetching by id
/// returns only the descriptor. Any other top-level fields are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDescriptor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SchemaRecord {
    /// The identifier this record is cached under: `schema_id` if present,
    /// otherwise the descriptor's id.
    pub fn id(&self) -> Option<&str> {
        self.schema_id
            .as_deref()
            .or_else(|| self.schema.as_ref().map(|s| s.id.as_str()))
    }

    pub fn name(&self) -> Option<&str> {
        self.schema.as_ref().map(|s| s.name.as_str())
    }

    pub fn version(&self) -> Option<&str> {
        self.schema.as_ref().map(|s| s.version.as_str())
    }

    pub fn attributes(&self) -> &[String] {
        self.schema
            .as_ref()
            .map(|s| s.attr_names.as_slice())
            .unwrap_or(&[])
    }
}

/// Body of `GET /schemas/created`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaIdsResponse {
    #[serde(default)]
    pub schema_ids: Vec<String>,
}

/// Body of `POST /ledger/taa/accept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaaAcceptance {
    pub mechanism: String,
    pub text: String,
    pub version: String,
}

impl Default for TaaAcceptance {
    fn default() -> Self {
        Self {
            mechanism: DEFAULT_TAA_MECHANISM.into(),
            text: DEFAULT_TAA_TEXT.into(),
            version: DEFAULT_TAA_VERSION.into(),
        }
    }
}
