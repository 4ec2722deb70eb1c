use async_trait::async_trait;

use super::names::CollectionName;
use crate::domain::event::Event;

// ============================================================================
// Document Store - External Collaborator
// ============================================================================
//
// The seeder only needs four things from its store: a connection to a named
// database (done by the implementation's constructor), collection creation,
// a document count and a single batch insert.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Connection, authentication or read failure
    #[error("store unreachable: {0}")]
    Unavailable(String),

    /// The store refused a write
    #[error("write rejected: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create the collection if absent. Must succeed when it already exists.
    async fn ensure_collection(&self, collection: &CollectionName) -> Result<(), StoreError>;

    /// Number of documents currently in the collection
    async fn count_documents(&self, collection: &CollectionName) -> Result<u64, StoreError>;

    /// Insert every record as one batch, returning how many were written
    async fn insert_many(
        &self,
        collection: &CollectionName,
        records: &[Event],
    ) -> Result<usize, StoreError>;
}
