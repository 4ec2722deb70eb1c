use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::event::Event;
use crate::error::SeedError;
use crate::store::{CollectionName, DocumentStore, StoreError};

// ============================================================================
// Seeder - Idempotent Collection Seeding
// ============================================================================
//
// Two independent one-way transitions:
//   CollectionMissing -> CollectionPresent   (ensure_collection)
//   CollectionEmpty   -> CollectionSeeded    (seed_if_empty)
//
// Single attempt per run, no retries. Restarting the process is the recovery
// path, which is safe because a populated collection is never written again.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection was empty and the batch was written
    Seeded { inserted: usize },
    /// The collection already held documents; nothing was written
    AlreadyPopulated { existing: u64 },
}

impl SeedOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            SeedOutcome::Seeded { .. } => "seeded",
            SeedOutcome::AlreadyPopulated { .. } => "skipped",
        }
    }
}

pub struct Seeder<S: DocumentStore> {
    store: Arc<S>,
    collection: CollectionName,
    records: Vec<Event>,
}

impl<S: DocumentStore> Seeder<S> {
    pub fn new(store: Arc<S>, collection: CollectionName, records: Vec<Event>) -> Self {
        Self {
            store,
            collection,
            records,
        }
    }

    pub fn collection(&self) -> &CollectionName {
        &self.collection
    }

    pub fn records(&self) -> &[Event] {
        &self.records
    }

    /// Validate, make sure the collection exists, then seed it if empty
    pub async fn run(&self) -> Result<SeedOutcome, SeedError> {
        self.validate_records()?;
        self.ensure_collection().await?;
        self.seed_if_empty().await
    }

    /// Create the collection if absent; a no-op when it already exists
    pub async fn ensure_collection(&self) -> Result<(), SeedError> {
        self.store
            .ensure_collection(&self.collection)
            .await
            .map_err(unavailable)?;

        tracing::debug!(collection = %self.collection, "Collection ensured");
        Ok(())
    }

    /// Insert every seed record in one batch, but only into an empty collection
    pub async fn seed_if_empty(&self) -> Result<SeedOutcome, SeedError> {
        self.validate_records()?;
        self.insert_if_empty().await
    }

    pub fn validate_records(&self) -> Result<(), SeedError> {
        validate_records(&self.records)
    }

    async fn insert_if_empty(&self) -> Result<SeedOutcome, SeedError> {
        let existing = self
            .store
            .count_documents(&self.collection)
            .await
            .map_err(unavailable)?;

        if existing > 0 {
            tracing::info!(
                collection = %self.collection,
                count = existing,
                "Collection already populated, skipping seed"
            );
            return Ok(SeedOutcome::AlreadyPopulated { existing });
        }

        if self.records.is_empty() {
            tracing::warn!(collection = %self.collection, "No seed records configured");
            return Ok(SeedOutcome::Seeded { inserted: 0 });
        }

        let attempted = self.records.len();
        let inserted = self
            .store
            .insert_many(&self.collection, &self.records)
            .await
            .map_err(|e| {
                tracing::error!(
                    collection = %self.collection,
                    attempted = attempted,
                    error = %e,
                    "Seed batch failed"
                );
                SeedError::WriteFailed {
                    attempted,
                    reason: e.to_string(),
                }
            })?;

        tracing::info!(
            collection = %self.collection,
            inserted = inserted,
            "✅ Initialized collection with example documents"
        );

        Ok(SeedOutcome::Seeded { inserted })
    }
}

/// Reject the whole set if any record breaks an Event invariant or two
/// records share a store key (they would collapse into one row)
pub fn validate_records(records: &[Event]) -> Result<(), SeedError> {
    let mut seen: HashMap<(&str, DateTime<Utc>), usize> = HashMap::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        record.validate().map_err(|source| SeedError::InvalidSeed {
            index,
            title: record.title.clone(),
            source,
        })?;

        if let Some(first_index) = seen.insert(record.key(), index) {
            return Err(SeedError::DuplicateSeed {
                index,
                first_index,
                title: record.title.clone(),
                start: record.start,
            });
        }
    }
    Ok(())
}

fn unavailable(error: StoreError) -> SeedError {
    SeedError::StoreUnavailable(error.to_string())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::{DayOfWeek, EventError};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn create_sprint_planning() -> Event {
        Event {
            title: "Sprint Planning".to_string(),
            description: "Planung des nächsten Sprints".to_string(),
            start: "2025-07-01T09:00:00Z".parse().unwrap(),
            end: "2025-07-01T10:00:00Z".parse().unwrap(),
            cron: "0 0 9 ? * MON#1".to_string(),
            tags: vec!["Agile".to_string(), "Team".to_string()],
            days_of_week: [DayOfWeek::Mon].into_iter().collect(),
            day_of_month: Some(1),
            months: (1..=12).collect(),
        }
    }

    fn create_team_retro() -> Event {
        Event {
            title: "Team Retro".to_string(),
            description: "Retrospektive zum letzten Sprint".to_string(),
            start: "2025-07-08T16:00:00Z".parse().unwrap(),
            end: "2025-07-08T17:00:00Z".parse().unwrap(),
            cron: "0 0 16 ? * TUE#2".to_string(),
            tags: vec!["Agile".to_string(), "Review".to_string()],
            days_of_week: [DayOfWeek::Tue].into_iter().collect(),
            day_of_month: Some(8),
            months: (1..=12).collect(),
        }
    }

    fn events() -> CollectionName {
        CollectionName::new("events").unwrap()
    }

    fn create_seeder(store: &Arc<MemoryStore>) -> Seeder<MemoryStore> {
        Seeder::new(store.clone(), events(), vec![create_sprint_planning(), create_team_retro()])
    }

    /// Reports an empty collection and refuses every write
    struct RejectingStore {
        insert_calls: AtomicU32,
    }

    #[async_trait]
    impl DocumentStore for RejectingStore {
        async fn ensure_collection(&self, _: &CollectionName) -> Result<(), StoreError> {
            Ok(())
        }

        async fn count_documents(&self, _: &CollectionName) -> Result<u64, StoreError> {
            Ok(0)
        }

        async fn insert_many(&self, _: &CollectionName, _: &[Event]) -> Result<usize, StoreError> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Rejected("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn test_empty_store_seeds_two_records() {
        let store = Arc::new(MemoryStore::new());
        let seeder = create_seeder(&store);

        let outcome = seeder.run().await.unwrap();
        assert_eq!(outcome, SeedOutcome::Seeded { inserted: 2 });
        assert_eq!(store.count_documents(&events()).await.unwrap(), 2);

        let titles: BTreeSet<String> = store
            .documents(&events())
            .await
            .into_iter()
            .map(|d| d.event.title)
            .collect();
        let expected: BTreeSet<String> = ["Sprint Planning", "Team Retro"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(titles, expected);
    }

    #[tokio::test]
    async fn test_repeated_runs_insert_once() {
        let store = Arc::new(MemoryStore::new());
        let seeder = create_seeder(&store);

        assert_eq!(seeder.run().await.unwrap(), SeedOutcome::Seeded { inserted: 2 });
        assert_eq!(
            seeder.run().await.unwrap(),
            SeedOutcome::AlreadyPopulated { existing: 2 }
        );
        assert_eq!(
            create_seeder(&store).run().await.unwrap(),
            SeedOutcome::AlreadyPopulated { existing: 2 }
        );

        assert_eq!(store.count_documents(&events()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_populated_collection_is_left_alone() {
        let store = Arc::new(MemoryStore::new());
        let unrelated = Event {
            title: "Something else entirely".to_string(),
            ..create_team_retro()
        };
        store.ensure_collection(&events()).await.unwrap();
        store.insert_many(&events(), &[unrelated]).await.unwrap();

        let outcome = create_seeder(&store).run().await.unwrap();

        assert_eq!(outcome, SeedOutcome::AlreadyPopulated { existing: 1 });
        let docs = store.documents(&events()).await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].event.title, "Something else entirely");
    }

    #[tokio::test]
    async fn test_unreachable_store_signals_unavailable() {
        let store = Arc::new(MemoryStore::unreachable());
        let seeder = Seeder::new(store.clone(), events(), vec![create_sprint_planning()]);

        let result = seeder.run().await;

        assert!(matches!(result, Err(SeedError::StoreUnavailable(_))));
        assert!(!store.has_collection(&events()).await);
        assert!(store.documents(&events()).await.is_empty());
    }

    #[tokio::test]
    async fn test_seed_if_empty_on_unreachable_store() {
        let store = Arc::new(MemoryStore::unreachable());
        let seeder = Seeder::new(store, events(), vec![create_sprint_planning()]);

        assert!(matches!(seeder.seed_if_empty().await, Err(SeedError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_rejected_batch_signals_write_failed_with_count() {
        let store = Arc::new(RejectingStore {
            insert_calls: AtomicU32::new(0),
        });
        let seeder = Seeder::new(
            store.clone(),
            events(),
            vec![create_sprint_planning(), create_team_retro()],
        );

        match seeder.run().await {
            Err(SeedError::WriteFailed { attempted, reason }) => {
                assert_eq!(attempted, 2);
                assert!(reason.contains("disk full"));
            }
            other => panic!("expected WriteFailed, got {:?}", other),
        }
        // Single attempt, no retry
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_record_aborts_before_any_write() {
        let store = Arc::new(MemoryStore::new());
        let mut broken = create_team_retro();
        broken.end = broken.start;
        let seeder = Seeder::new(store.clone(), events(), vec![create_sprint_planning(), broken]);

        match seeder.run().await {
            Err(SeedError::InvalidSeed { index, title, source }) => {
                assert_eq!(index, 1);
                assert_eq!(title, "Team Retro");
                assert!(matches!(source, EventError::InvalidTimeRange { .. }));
            }
            other => panic!("expected InvalidSeed, got {:?}", other),
        }
        assert!(!store.has_collection(&events()).await);
    }

    #[tokio::test]
    async fn test_seed_if_empty_validates_too() {
        let store = Arc::new(MemoryStore::new());
        let mut broken = create_sprint_planning();
        broken.title = String::new();
        let seeder = Seeder::new(store.clone(), events(), vec![broken]);

        assert!(matches!(seeder.seed_if_empty().await, Err(SeedError::InvalidSeed { .. })));
        assert!(!store.has_collection(&events()).await);
    }

    #[tokio::test]
    async fn test_duplicate_seed_keys_rejected_before_any_write() {
        let store = Arc::new(MemoryStore::new());
        let twin = Event {
            description: "Same slot, different text".to_string(),
            ..create_sprint_planning()
        };
        let seeder = Seeder::new(
            store.clone(),
            events(),
            vec![create_sprint_planning(), create_team_retro(), twin],
        );

        match seeder.run().await {
            Err(SeedError::DuplicateSeed { index, first_index, title, start }) => {
                assert_eq!(index, 2);
                assert_eq!(first_index, 0);
                assert_eq!(title, "Sprint Planning");
                assert_eq!(start, create_sprint_planning().start);
            }
            other => panic!("expected DuplicateSeed, got {:?}", other),
        }
        assert!(!store.has_collection(&events()).await);
    }

    #[tokio::test]
    async fn test_sub_millisecond_start_rejected_before_any_write() {
        let store = Arc::new(MemoryStore::new());
        let mut precise = create_team_retro();
        precise.start = precise.start + chrono::Duration::microseconds(250);
        let seeder = Seeder::new(store.clone(), events(), vec![precise]);

        match seeder.run().await {
            Err(SeedError::InvalidSeed { source, .. }) => {
                assert!(matches!(source, EventError::SubMillisecondTimestamp(_)));
            }
            other => panic!("expected InvalidSeed, got {:?}", other),
        }
        assert!(!store.has_collection(&events()).await);
    }

    #[test]
    fn test_validate_records_accepts_same_title_on_other_days() {
        let next_week = Event {
            start: create_sprint_planning().start + chrono::Duration::days(7),
            end: create_sprint_planning().end + chrono::Duration::days(7),
            ..create_sprint_planning()
        };
        assert!(validate_records(&[create_sprint_planning(), next_week]).is_ok());
    }

    #[tokio::test]
    async fn test_seed_if_empty_without_collection_is_unavailable() {
        let store = Arc::new(MemoryStore::new());
        let seeder = create_seeder(&store);

        assert!(matches!(seeder.seed_if_empty().await, Err(SeedError::StoreUnavailable(_))));
        assert!(!store.has_collection(&events()).await);
    }

    #[tokio::test]
    async fn test_ensure_collection_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let seeder = create_seeder(&store);

        seeder.ensure_collection().await.unwrap();
        seeder.ensure_collection().await.unwrap();

        assert!(store.has_collection(&events()).await);
        assert_eq!(store.count_documents(&events()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_record_set_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let seeder = Seeder::new(store.clone(), events(), vec![]);

        assert_eq!(seeder.run().await.unwrap(), SeedOutcome::Seeded { inserted: 0 });
        assert!(store.has_collection(&events()).await);
        assert_eq!(store.count_documents(&events()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_embedded_set_seeds_with_valid_ranges() {
        let store = Arc::new(MemoryStore::new());
        let records = crate::seed_data::embedded().unwrap();
        let seeder = Seeder::new(store.clone(), events(), records);

        assert_eq!(seeder.run().await.unwrap(), SeedOutcome::Seeded { inserted: 6 });

        let docs = store.documents(&events()).await;
        assert_eq!(docs.len(), 6);
        assert!(docs.iter().all(|d| d.event.start < d.event.end));
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(SeedOutcome::Seeded { inserted: 2 }.label(), "seeded");
        assert_eq!(SeedOutcome::AlreadyPopulated { existing: 1 }.label(), "skipped");
    }
}
