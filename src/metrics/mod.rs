// Private module declaration
mod textfile;

use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};

use crate::seeder::SeedOutcome;

// Re-export for public API
pub use textfile::write_textfile;

// ============================================================================
// Metrics Module - Prometheus metrics for the seeding run
// ============================================================================
//
// The seeder is a one-shot job, so nothing is scraped live. The registry is
// rendered once at exit into a textfile (node_exporter textfile collector).
//
// ============================================================================

pub struct SeedMetrics {
    registry: Registry,

    pub runs_total: IntCounterVec,
    pub documents_inserted: IntCounter,
    pub existing_documents: IntGauge,
    pub run_duration: Histogram,
}

impl SeedMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let runs_total = IntCounterVec::new(
            Opts::new("seed_runs_total", "Seeder runs by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(runs_total.clone()))?;

        let documents_inserted = IntCounter::new(
            "seed_documents_inserted_total",
            "Seed documents written to the collection",
        )?;
        registry.register(Box::new(documents_inserted.clone()))?;

        let existing_documents = IntGauge::new(
            "seed_existing_documents",
            "Documents found in the collection before seeding",
        )?;
        registry.register(Box::new(existing_documents.clone()))?;

        let run_duration = Histogram::with_opts(
            HistogramOpts::new("seed_run_duration_seconds", "Seeder run duration")
                .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0]),
        )?;
        registry.register(Box::new(run_duration.clone()))?;

        Ok(Self {
            registry,
            runs_total,
            documents_inserted,
            existing_documents,
            run_duration,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a finished run
    pub fn record_outcome(&self, outcome: &SeedOutcome, duration_secs: f64) {
        self.runs_total.with_label_values(&[outcome.label()]).inc();
        match outcome {
            SeedOutcome::Seeded { inserted } => {
                self.existing_documents.set(0);
                self.documents_inserted.inc_by(*inserted as u64);
            }
            SeedOutcome::AlreadyPopulated { existing } => {
                self.existing_documents.set(i64::try_from(*existing).unwrap_or(i64::MAX));
            }
        }
        self.run_duration.observe(duration_secs);
    }

    /// Record a run that ended in an error
    pub fn record_failure(&self, duration_secs: f64) {
        self.runs_total.with_label_values(&["failed"]).inc();
        self.run_duration.observe(duration_secs);
    }
}
