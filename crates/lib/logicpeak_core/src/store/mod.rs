//! Document persistence façade.
//!
//! A single [`DocumentStore`] holds many named collections. Handlers never
//! touch it directly; they go through a [`Repository`] for one record kind,
//! which owns the collection name and the (de)serialization.

#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod postgres;

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::document::{Document, DocumentId};

pub use postgres::PgDocumentStore;

/// Number of documents returned when the caller does not give a limit.
pub const DEFAULT_LIMIT: u64 = 20;

/// Persistence errors. Nothing is retried or classified further.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to encode document for {collection}: {source}")]
    Encode {
        collection: &'static str,
        source: serde_json::Error,
    },

    #[error("Failed to decode document {id}: {source}")]
    Decode {
        id: DocumentId,
        source: serde_json::Error,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Backend holding JSON documents grouped into named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append `body` to `collection` and return its new identifier.
    async fn insert(&self, collection: &str, body: serde_json::Value) -> Result<DocumentId>;

    /// Up to `limit` documents of `collection` in store order.
    async fn find(&self, collection: &str, limit: u64) -> Result<Vec<Document>>;

    /// Up to `limit` collection names. Used as a liveness check.
    async fn list_collections(&self, limit: u32) -> Result<Vec<String>>;

    /// Name of the database backing this store, if known.
    fn database_name(&self) -> Option<&str>;
}

/// A record kind persisted in its own collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    /// Collection holding records of this kind.
    const COLLECTION: &'static str;
}

/// A record read back from the store together with its identifier.
///
/// Serializes as the record's fields plus `_id` as a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stored<R> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub record: R,
}

/// Typed access to the collection of one record kind.
pub struct Repository<'a, R> {
    store: &'a dyn DocumentStore,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: Record> Repository<'a, R> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Store `record` as a new document. No dedup is attempted.
    pub async fn create_document(&self, record: &R) -> Result<DocumentId> {
        let body = serde_json::to_value(record).map_err(|source| StoreError::Encode {
            collection: R::COLLECTION,
            source,
        })?;
        self.store.insert(R::COLLECTION, body).await
    }

    /// Fetch up to `limit` records.
    pub async fn get_documents(&self, limit: u64) -> Result<Vec<Stored<R>>> {
        let docs = self.store.find(R::COLLECTION, limit).await?;
        debug!(collection = R::COLLECTION, count = docs.len(), "fetched documents");

        docs.into_iter()
            .map(|doc| -> Result<Stored<R>> {
                let record = serde_json::from_value(doc.body)
                    .map_err(|source| StoreError::Decode { id: doc.id, source })?;
                Ok(Stored { id: doc.id, record })
            })
            .collect()
    }
}
