//! In-memory document store for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{DocumentStore, Result};
use crate::document::{Document, DocumentId};

/// Keeps documents per collection in insertion order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of documents across all collections.
    pub fn len(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Vec<Document>>> {
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, body: serde_json::Value) -> Result<DocumentId> {
        let id = DocumentId::generate();
        self.lock()
            .entry(collection.to_string())
            .or_default()
            .push(Document { id, body });
        Ok(id)
    }

    async fn find(&self, collection: &str, limit: u64) -> Result<Vec<Document>> {
        Ok(self
            .lock()
            .get(collection)
            .map(|docs| docs.iter().take(usize::try_from(limit).unwrap_or(usize::MAX)).cloned().collect())
            .unwrap_or_default())
    }

    async fn list_collections(&self, limit: u32) -> Result<Vec<String>> {
        Ok(self.lock().keys().take(limit as usize).cloned().collect())
    }

    fn database_name(&self) -> Option<&str> {
        Some("memory")
    }
}
