// ============================================================================
// Domain Layer - Calendar Seed Records
// ============================================================================
//
// Domain types only: no store access lives here. Each domain has its own
// subdirectory with value objects, errors and the record itself.
//
// ============================================================================

pub mod event;
