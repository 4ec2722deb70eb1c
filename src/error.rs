use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::domain::event::EventError;

// ============================================================================
// Seeder Errors
// ============================================================================
//
// Nothing here is recoverable inside the seeder. Every variant propagates to
// main, which logs it and exits non-zero so the orchestrator can restart us.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Write of {attempted} seed record(s) failed: {reason}")]
    WriteFailed { attempted: usize, reason: String },

    #[error("Seed record #{index} ({title:?}) is invalid: {source}")]
    InvalidSeed {
        index: usize,
        title: String,
        #[source]
        source: EventError,
    },

    #[error("Seed record #{index} repeats the key of record #{first_index} (title={title:?}, start={start})")]
    DuplicateSeed {
        index: usize,
        first_index: usize,
        title: String,
        start: DateTime<Utc>,
    },

    #[error("Invalid identifier: {0}")]
    InvalidName(String),

    #[error("Cannot read seed file {path}: {source}")]
    SeedResource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed seed data: {0}")]
    SeedFormat(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
