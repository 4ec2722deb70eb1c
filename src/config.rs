use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::SeedError;
use crate::store::{CollectionName, KeyspaceName};

// ============================================================================
// Seeder Configuration
// ============================================================================
//
// Everything comes from environment variables so the seeder can run as a
// one-shot container next to the database:
//
//   SEED_STORE                 scylla | memory          (default scylla)
//   SCYLLA_NODES               comma separated nodes    (default 127.0.0.1:9042)
//   SCYLLA_CONNECT_TIMEOUT_MS  session connect timeout  (default 5000)
//   SEED_KEYSPACE              database name            (default calendar_db)
//   SEED_REPLICATION_FACTOR    keyspace replication     (default 1)
//   SEED_COLLECTION            target collection        (default events)
//   SEED_FILE                  JSON seed file           (default: embedded set)
//   SEED_METRICS_FILE          Prometheus textfile      (default: none)
//
// ============================================================================

const DEFAULT_NODES: &str = "127.0.0.1:9042";
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;
const DEFAULT_KEYSPACE: &str = "calendar_db";
const DEFAULT_REPLICATION_FACTOR: u32 = 1;
const DEFAULT_COLLECTION: &str = "events";

/// Which document store the seeder talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Scylla,
    /// Process-local store, nothing survives the run
    Memory,
}

impl FromStr for StoreBackend {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scylla" | "scylladb" => Ok(StoreBackend::Scylla),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(SeedError::Config(format!("unknown SEED_STORE: {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScyllaConfig {
    pub nodes: Vec<String>,
    pub keyspace: KeyspaceName,
    pub replication_factor: u32,
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SeederConfig {
    pub backend: StoreBackend,
    pub scylla: ScyllaConfig,
    pub collection: CollectionName,
    pub seed_file: Option<PathBuf>,
    pub metrics_file: Option<PathBuf>,
}

impl SeederConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, SeedError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SeedError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend = match get("SEED_STORE") {
            Some(raw) => raw.parse()?,
            None => StoreBackend::Scylla,
        };

        let nodes: Vec<String> = get("SCYLLA_NODES")
            .unwrap_or_else(|| DEFAULT_NODES.to_string())
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        if nodes.is_empty() {
            return Err(SeedError::Config("SCYLLA_NODES lists no nodes".to_string()));
        }

        let connect_timeout_ms: u64 =
            parse_number(get("SCYLLA_CONNECT_TIMEOUT_MS"), "SCYLLA_CONNECT_TIMEOUT_MS", DEFAULT_CONNECT_TIMEOUT_MS)?;
        let replication_factor: u32 =
            parse_number(get("SEED_REPLICATION_FACTOR"), "SEED_REPLICATION_FACTOR", DEFAULT_REPLICATION_FACTOR)?;
        if replication_factor == 0 {
            return Err(SeedError::Config("SEED_REPLICATION_FACTOR must be at least 1".to_string()));
        }

        let keyspace = KeyspaceName::new(&get("SEED_KEYSPACE").unwrap_or_else(|| DEFAULT_KEYSPACE.to_string()))?;
        let collection =
            CollectionName::new(&get("SEED_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string()))?;

        Ok(Self {
            backend,
            scylla: ScyllaConfig {
                nodes,
                keyspace,
                replication_factor,
                connect_timeout: Duration::from_millis(connect_timeout_ms),
            },
            collection,
            seed_file: get("SEED_FILE").map(PathBuf::from),
            metrics_file: get("SEED_METRICS_FILE").map(PathBuf::from),
        })
    }
}

fn parse_number<T>(raw: Option<String>, name: &str, default: T) -> Result<T, SeedError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| SeedError::Config(format!("invalid {name}: {e}"))),
        None => Ok(default),
    }
}
