use std::path::Path;

use crate::domain::event::Event;
use crate::error::SeedError;

// ============================================================================
// Seed Data Resource
// ============================================================================
//
// The canonical example set ships inside the binary. SEED_FILE may replace it
// with another JSON array in the same format.
//
// ============================================================================

const EMBEDDED_EVENTS: &str = include_str!("../seeds/events.json");

/// Parse the record set compiled into the binary
pub fn embedded() -> Result<Vec<Event>, SeedError> {
    parse(EMBEDDED_EVENTS)
}

/// Load seed records from `path`, or the embedded set when no path is given
pub fn load(path: Option<&Path>) -> Result<Vec<Event>, SeedError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| SeedError::SeedResource {
                path: path.to_path_buf(),
                source,
            })?;
            let records = parse(&json)?;
            tracing::info!(path = %path.display(), records = records.len(), "Loaded seed file");
            Ok(records)
        }
        None => embedded(),
    }
}

pub fn parse(json: &str) -> Result<Vec<Event>, SeedError> {
    Ok(serde_json::from_str(json)?)
}
