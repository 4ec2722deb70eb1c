use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::errors::EventError;
use super::value_objects::{DayOfWeek, DAY_OF_MONTH_RANGE, MONTH_RANGE};

// ============================================================================
// Event - Calendar Seed Record
// ============================================================================
//
// One example calendar entry as it is written into the events collection.
// The `cron` field is carried verbatim and never interpreted here.
//
// ============================================================================

const NANOS_PER_MILLI: u32 = 1_000_000;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub cron: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub days_of_week: BTreeSet<DayOfWeek>,
    #[serde(default)]
    pub day_of_month: Option<u8>,
    #[serde(default)]
    pub months: BTreeSet<u8>,
}

impl Event {
    /// Check the record invariants before it is allowed anywhere near the store
    pub fn validate(&self) -> Result<(), EventError> {
        if self.title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }
        // The store keeps milliseconds; anything finer would be truncated on write
        for instant in [self.start, self.end] {
            if instant.nanosecond() % NANOS_PER_MILLI != 0 {
                return Err(EventError::SubMillisecondTimestamp(instant));
            }
        }
        if self.start >= self.end {
            return Err(EventError::InvalidTimeRange {
                start: self.start,
                end: self.end,
            });
        }
        if let Some(day) = self.day_of_month {
            if !DAY_OF_MONTH_RANGE.contains(&day) {
                return Err(EventError::DayOfMonthOutOfRange(day));
            }
        }
        if let Some(month) = self.months.iter().find(|m| !MONTH_RANGE.contains(*m)) {
            return Err(EventError::MonthOutOfRange(*month));
        }
        Ok(())
    }

    /// Uniqueness key in the store: the same title can recur at different starts
    pub fn key(&self) -> (&str, DateTime<Utc>) {
        (self.title.as_str(), self.start)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
