use chrono::{DateTime, Utc};

// ============================================================================
// Calendar Event Validation Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EventError {
    #[error("Event title cannot be empty")]
    EmptyTitle,

    #[error("Event start {start} must be before end {end}")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Day of month out of range (1-31): {0}")]
    DayOfMonthOutOfRange(u8),

    #[error("Month out of range (1-12): {0}")]
    MonthOutOfRange(u8),

    #[error("Timestamp {0} is finer than millisecond precision")]
    SubMillisecondTimestamp(DateTime<Utc>),
}
