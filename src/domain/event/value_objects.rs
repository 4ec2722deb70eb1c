use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Calendar Event Value Objects
// ============================================================================

/// Inclusive bounds for `dayOfMonth`
pub const DAY_OF_MONTH_RANGE: std::ops::RangeInclusive<u8> = 1..=31;

/// Inclusive bounds for entries of `months`
pub const MONTH_RANGE: std::ops::RangeInclusive<u8> = 1..=12;

/// Weekday abbreviation as it appears in seed documents (`MON`, `TUE`, ...)
///
/// Ordered Monday first so sets of weekdays serialize in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Mon => "MON",
            DayOfWeek::Tue => "TUE",
            DayOfWeek::Wed => "WED",
            DayOfWeek::Thu => "THU",
            DayOfWeek::Fri => "FRI",
            DayOfWeek::Sat => "SAT",
            DayOfWeek::Sun => "SUN",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
