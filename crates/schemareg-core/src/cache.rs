//! In-memory schema cache.
//!
//! Two [`SchemaSet`]s: every schema the client has seen, and the subset that
//! may be served without authentication. Thread-safe via `RwLock`.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::schema::SchemaRecord;

/// Schemas keyed by identifier, plus an optional default.
///
/// The default is tracked by id rather than stored under a reserved key, so
/// an identifier that happens to be spelled `"default"` is an ordinary entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaSet {
    pub by_id: HashMap<String, SchemaRecord>,
    pub default_id: Option<String>,
}

impl SchemaSet {
    pub fn get(&self, id: &str) -> Option<&SchemaRecord> {
        self.by_id.get(id)
    }

    pub fn default_schema(&self) -> Option<&SchemaRecord> {
        self.default_id.as_deref().and_then(|id| self.by_id.get(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Sorted identifiers.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.by_id.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn insert(&mut self, id: &str, record: SchemaRecord, make_default: bool) {
        self.by_id.insert(id.to_string(), record);
        if make_default {
            self.default_id = Some(id.to_string());
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    all: SchemaSet,
    public: SchemaSet,
}

/// Process-lifetime cache of known schemas.
#[derive(Debug, Default)]
pub struct RegistryCache {
    inner: RwLock<Inner>,
}

impl RegistryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `record` under `id`.
    ///
    /// `is_default` makes it the default of the full set; `is_public` also
    /// stores it in the public set, where it becomes the default too when
    /// both flags are set. Existing entries under `id` are replaced.
    pub fn store(&self, id: &str, record: SchemaRecord, is_default: bool, is_public: bool) {
        let mut inner = self.write();
        if is_public {
            inner.public.insert(id, record.clone(), is_default);
            tracing::debug!(schema_id = %id, default = is_default, "schema stored as public");
        }
        inner.all.insert(id, record, is_default);
        if is_default {
            tracing::debug!(schema_id = %id, "schema stored as default");
        }
    }

    pub fn get(&self, id: &str) -> Option<SchemaRecord> {
        self.read().all.get(id).cloned()
    }

    pub fn default_schema(&self) -> Option<SchemaRecord> {
        self.read().all.default_schema().cloned()
    }

    pub fn get_public(&self, id: &str) -> Option<SchemaRecord> {
        self.read().public.get(id).cloned()
    }

    pub fn default_public_schema(&self) -> Option<SchemaRecord> {
        self.read().public.default_schema().cloned()
    }

    pub fn default_id(&self) -> Option<String> {
        self.read().all.default_id.clone()
    }

    pub fn ids(&self) -> Vec<String> {
        self.read().all.ids()
    }

    pub fn public_ids(&self) -> Vec<String> {
        self.read().public.ids()
    }

    /// Number of schemas in the full set.
    pub fn len(&self) -> usize {
        self.read().all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clones of the full and public sets, in that order.
    pub fn snapshot(&self) -> (SchemaSet, SchemaSet) {
        let inner = self.read();
        (inner.all.clone(), inner.public.clone())
    }
}
