// ============================================================================
// Document Stores
// ============================================================================
//
// The DocumentStore trait is the seeder's only view of persistence.
// Implementations:
// - ScyllaStore  - keyspace/table backed, used in production
// - MemoryStore  - process-local, used for dry runs and tests
//
// ============================================================================

mod document_store;
mod memory_store;
mod names;
mod scylla_store;

pub use document_store::{DocumentStore, StoreError};
pub use memory_store::{MemoryStore, StoredDocument};
pub use names::{CollectionName, KeyspaceName};
pub use scylla_store::ScyllaStore;
