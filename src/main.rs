use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod domain;
mod error;
mod metrics;
mod seed_data;
mod seeder;
mod store;

use config::{SeederConfig, StoreBackend};
use error::SeedError;
use metrics::SeedMetrics;
use seeder::{SeedOutcome, Seeder};
use store::{DocumentStore, MemoryStore, ScyllaStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,calendar_seeder=debug"))
        )
        .init();

    tracing::info!("🌱 Starting calendar event seeder");

    let config = SeederConfig::from_env()?;
    tracing::info!(
        backend = ?config.backend,
        keyspace = %config.scylla.keyspace,
        collection = %config.collection,
        seed_file = ?config.seed_file,
        "Configuration loaded"
    );

    let metrics = SeedMetrics::new()?;
    let started = Instant::now();

    let result = run(&config).await;
    let elapsed = started.elapsed().as_secs_f64();

    match &result {
        Ok(outcome) => metrics.record_outcome(outcome, elapsed),
        Err(_) => metrics.record_failure(elapsed),
    }

    if let Some(path) = &config.metrics_file {
        if let Err(e) = metrics::write_textfile(metrics.registry(), path) {
            tracing::warn!(error = %e, path = %path.display(), "Could not write metrics textfile");
        }
    }

    match result {
        Ok(SeedOutcome::Seeded { inserted }) => {
            tracing::info!(inserted = inserted, elapsed_secs = elapsed, "🎉 Seeding complete");
            Ok(())
        }
        Ok(SeedOutcome::AlreadyPopulated { existing }) => {
            tracing::info!(existing = existing, elapsed_secs = elapsed, "Nothing to do");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "❌ Seeding failed");
            Err(e.into())
        }
    }
}

async fn run(config: &SeederConfig) -> Result<SeedOutcome, SeedError> {
    // Unreadable or invalid seed data fails before any connection attempt
    let records = seed_data::load(config.seed_file.as_deref())?;
    seeder::validate_records(&records)?;

    match config.backend {
        StoreBackend::Scylla => {
            let store = ScyllaStore::connect(&config.scylla)
                .await
                .map_err(|e| SeedError::StoreUnavailable(e.to_string()))?;
            seed(Arc::new(store), config, records).await
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, nothing will be persisted");
            let store = Arc::new(MemoryStore::new());
            let outcome = seed(store.clone(), config, records).await?;

            for doc in store.documents(&config.collection).await {
                tracing::debug!(
                    id = %doc.id,
                    title = %doc.event.title,
                    start = %doc.event.start,
                    inserted_at = %doc.inserted_at,
                    "Dry-run document"
                );
            }
            Ok(outcome)
        }
    }
}

async fn seed<S: DocumentStore>(
    store: Arc<S>,
    config: &SeederConfig,
    records: Vec<domain::event::Event>,
) -> Result<SeedOutcome, SeedError> {
    let seeder = Seeder::new(store, config.collection.clone(), records);

    tracing::info!(
        collection = %seeder.collection(),
        records = seeder.records().len(),
        "Seeding collection if empty"
    );

    seeder.run().await
}
