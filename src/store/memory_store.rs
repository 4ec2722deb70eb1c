use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::document_store::{DocumentStore, StoreError};
use super::names::CollectionName;
use crate::domain::event::Event;

// ============================================================================
// In-Memory Document Store
// ============================================================================
//
// Process-local store used as the dry-run backend and by the unit tests.
// Batch inserts are all-or-nothing and (title, start) is unique per
// collection, mirroring the primary key of the ScyllaDB table. Counting or
// inserting into a collection that was never ensured is `Unavailable`, as a
// query against a missing table is.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: Uuid,
    pub event: Event,
    pub inserted_at: DateTime<Utc>,
}

pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<StoredDocument>>>,
    reachable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            reachable: true,
        }
    }

    /// A store that fails every call with `Unavailable` and never changes state
    #[cfg(test)]
    pub fn unreachable() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            reachable: false,
        }
    }

    /// Snapshot of the documents in a collection (empty if it does not exist)
    pub async fn documents(&self, collection: &CollectionName) -> Vec<StoredDocument> {
        self.collections
            .lock()
            .await
            .get(collection.as_str())
            .cloned()
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub async fn has_collection(&self, collection: &CollectionName) -> bool {
        self.collections.lock().await.contains_key(collection.as_str())
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.reachable {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store marked unreachable".to_string()))
        }
    }
}

fn missing(collection: &CollectionName) -> StoreError {
    StoreError::Unavailable(format!("collection {} does not exist", collection))
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ensure_collection(&self, collection: &CollectionName) -> Result<(), StoreError> {
        self.check_reachable()?;

        let mut collections = self.collections.lock().await;
        if !collections.contains_key(collection.as_str()) {
            collections.insert(collection.as_str().to_string(), Vec::new());
            tracing::debug!(collection = %collection, "Created in-memory collection");
        }
        Ok(())
    }

    async fn count_documents(&self, collection: &CollectionName) -> Result<u64, StoreError> {
        self.check_reachable()?;

        let collections = self.collections.lock().await;
        collections
            .get(collection.as_str())
            .map(|docs| docs.len() as u64)
            .ok_or_else(|| missing(collection))
    }

    async fn insert_many(
        &self,
        collection: &CollectionName,
        records: &[Event],
    ) -> Result<usize, StoreError> {
        self.check_reachable()?;

        let mut collections = self.collections.lock().await;
        let docs = collections
            .get_mut(collection.as_str())
            .ok_or_else(|| missing(collection))?;

        // Reject the whole batch before touching anything
        {
            let mut keys: HashSet<(&str, DateTime<Utc>)> =
                docs.iter().map(|d| d.event.key()).collect();
            for record in records {
                if !keys.insert(record.key()) {
                    return Err(StoreError::Rejected(format!(
                        "duplicate key (title={:?}, start={})",
                        record.title, record.start
                    )));
                }
            }
        }

        let now = Utc::now();
        docs.extend(records.iter().cloned().map(|event| StoredDocument {
            id: Uuid::new_v4(),
            event,
            inserted_at: now,
        }));

        Ok(records.len())
    }
}
