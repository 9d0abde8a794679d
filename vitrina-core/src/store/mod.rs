//! Remote Catalog Store
//!
//! Opaque keyed-document collections. The catalog only needs list / get /
//! create / update / delete plus an idempotent set-union on one field.

mod memory;

pub use memory::{MemoryStore, StoreCalls};

use async_trait::async_trait;
use serde_json::{Map, Value};
use shared::CatalogError;
use thiserror::Error;

/// Document body: field name -> JSON value
pub type Fields = Map<String, Value>;

/// A stored document: its key plus its fields
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub fields: Fields,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Store error types
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    #[error("Malformed store response: {0}")]
    Malformed(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id, .. } => CatalogError::NotFound(id),
            other => CatalogError::StoreUnavailable(other.to_string()),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed document store used by the catalog repositories
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All documents of a collection, in store order
    async fn list(&self, collection: &str) -> StoreResult<Vec<Record>>;

    /// The first document of a single-document (configuration) collection
    async fn get(&self, collection: &str) -> StoreResult<Option<Record>>;

    /// Insert a document, returning the store-assigned key
    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String>;

    /// Merge `fields` into an existing document
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Add `value` to the array `field` unless already present.
    /// Creates the document when it does not exist yet.
    async fn append_to_set(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> StoreResult<()>;
}
