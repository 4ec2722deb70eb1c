use std::fmt;

use crate::error::SeedError;

// ============================================================================
// Store Identifiers
// ============================================================================
//
// Keyspace and collection names end up inside CQL text (DDL cannot bind
// identifiers), so they are only constructed through validation.
// Rules: 1-48 chars, ASCII alphanumerics or '_', not starting with a digit.
//
// ============================================================================

const MAX_IDENTIFIER_LEN: usize = 48;

fn validate_identifier(kind: &str, raw: &str) -> Result<String, SeedError> {
    let mut chars = raw.chars();
    let first_ok = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);

    if !first_ok
        || raw.len() > MAX_IDENTIFIER_LEN
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(SeedError::InvalidName(format!("{kind} name {raw:?}")));
    }

    Ok(raw.to_string())
}

/// Name of the collection (ScyllaDB table) the seeder writes to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(raw: &str) -> Result<Self, SeedError> {
        validate_identifier("collection", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of the database (ScyllaDB keyspace) the store connects to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyspaceName(String);

impl KeyspaceName {
    pub fn new(raw: &str) -> Result<Self, SeedError> {
        validate_identifier("keyspace", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyspaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
