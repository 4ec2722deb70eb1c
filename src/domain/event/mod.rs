// ============================================================================
// Event Domain - Calendar Seed Records
// ============================================================================
//
// This module contains ALL calendar-event specific code:
// - Value objects (DayOfWeek, day/month bounds)
// - Errors (EventError enum)
// - Record (Event with its invariants)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod record;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use record::*;
