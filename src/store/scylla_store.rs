use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::statement::batch::Batch;
use uuid::Uuid;

use super::document_store::{DocumentStore, StoreError};
use super::names::CollectionName;
use crate::config::ScyllaConfig;
use crate::domain::event::Event;

// ============================================================================
// ScyllaDB Document Store
// ============================================================================
//
// Keyspace = database, table = collection.
//
// The table is keyed by (title, starts_at). Two seeders racing on an empty
// table therefore write the same partitions instead of duplicating rows.
//
// ============================================================================

pub struct ScyllaStore {
    session: Session,
}

/// Bound values of one INSERT, in column order of `insert_statement`
type EventRow = (
    String,
    DateTime<Utc>,
    DateTime<Utc>,
    Uuid,
    String,
    String,
    Vec<String>,
    Vec<String>,
    Option<i32>,
    Vec<i32>,
);

impl ScyllaStore {
    /// Connect and select the keyspace, creating it if needed
    pub async fn connect(config: &ScyllaConfig) -> Result<Self, StoreError> {
        tracing::info!(nodes = ?config.nodes, keyspace = %config.keyspace, "Connecting to ScyllaDB...");

        let session: Session = SessionBuilder::new()
            .known_nodes(&config.nodes)
            .connection_timeout(config.connect_timeout)
            .build()
            .await
            .map_err(|e| StoreError::Unavailable(format!("cannot connect to {:?}: {}", config.nodes, e)))?;

        session
            .query_unpaged(
                format!(
                    "CREATE KEYSPACE IF NOT EXISTS {} WITH REPLICATION = \
                     {{'class': 'SimpleStrategy', 'replication_factor': {}}}",
                    config.keyspace, config.replication_factor
                ),
                (),
            )
            .await
            .map_err(|e| StoreError::Unavailable(format!("cannot create keyspace {}: {}", config.keyspace, e)))?;

        session
            .use_keyspace(config.keyspace.as_str(), false)
            .await
            .map_err(|e| StoreError::Unavailable(format!("cannot use keyspace {}: {}", config.keyspace, e)))?;

        tracing::info!(keyspace = %config.keyspace, "✅ Connected to ScyllaDB");
        Ok(Self { session })
    }

    fn insert_statement(collection: &CollectionName) -> String {
        format!(
            "INSERT INTO {} (
                title, starts_at, ends_at, id, description, cron,
                tags, days_of_week, day_of_month, months
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            collection
        )
    }

    fn to_row(event: &Event) -> EventRow {
        (
            event.title.clone(),
            event.start,
            event.end,
            Uuid::new_v4(),
            event.description.clone(),
            event.cron.clone(),
            event.tags.clone(),
            event.days_of_week.iter().map(|d| d.as_str().to_string()).collect(),
            event.day_of_month.map(i32::from),
            event.months.iter().map(|m| i32::from(*m)).collect(),
        )
    }
}

#[async_trait]
impl DocumentStore for ScyllaStore {
    async fn ensure_collection(&self, collection: &CollectionName) -> Result<(), StoreError> {
        self.session
            .query_unpaged(
                format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                        title text,
                        starts_at timestamp,
                        ends_at timestamp,
                        id uuid,
                        description text,
                        cron text,
                        tags list<text>,
                        days_of_week set<text>,
                        day_of_month int,
                        months set<int>,
                        PRIMARY KEY ((title, starts_at))
                    )",
                    collection
                ),
                (),
            )
            .await
            .map_err(|e| StoreError::Unavailable(format!("cannot create collection {}: {}", collection, e)))?;

        tracing::debug!(collection = %collection, "Collection present");
        Ok(())
    }

    async fn count_documents(&self, collection: &CollectionName) -> Result<u64, StoreError> {
        let result = self
            .session
            .query_unpaged(format!("SELECT COUNT(*) FROM {}", collection), ())
            .await
            .map_err(|e| StoreError::Unavailable(format!("cannot count {}: {}", collection, e)))?;

        let rows_result = result
            .into_rows_result()
            .map_err(|e| StoreError::Unavailable(format!("unexpected COUNT response: {}", e)))?;

        let (count,) = rows_result
            .single_row::<(i64,)>()
            .map_err(|e| StoreError::Unavailable(format!("unexpected COUNT row: {}", e)))?;

        Ok(count.max(0) as u64)
    }

    async fn insert_many(
        &self,
        collection: &CollectionName,
        records: &[Event],
    ) -> Result<usize, StoreError> {
        // Logged batch: either every row lands or none do
        let mut batch = Batch::default();
        let statement = Self::insert_statement(collection);
        let mut values: Vec<EventRow> = Vec::with_capacity(records.len());

        for event in records {
            batch.append_statement(statement.as_str());
            values.push(Self::to_row(event));
        }

        self.session
            .batch(&batch, values)
            .await
            .map_err(|e| StoreError::Rejected(e.to_string()))?;

        tracing::debug!(collection = %collection, rows = records.len(), "Batch insert applied");
        Ok(records.len())
    }
}
