/// Time-of-day values in the catalog's 24-hour "HHMM" notation
use crate::error::ScheduleError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time within a single day, stored as minutes since midnight.
///
/// Parsed from (and displayed as) exactly four digits, e.g. `"0810"` or
/// `"1430"`. Valid values range from `0000` to `2359`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Builds a time from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, ScheduleError> {
        if hour >= 24 || minute >= 60 {
            return Err(ScheduleError::time_range(format!(
                "{hour:02}{minute:02} is outside 0000-2359"
            )));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // chrono is lenient about digit counts, so insist on the HHMM shape first
        if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ScheduleError::time_range(format!(
                "'{s}' is not a 24-hour HHMM time"
            )));
        }

        let parsed = NaiveTime::parse_from_str(trimmed, "%H%M").map_err(|e| {
            ScheduleError::time_range(format!("'{s}' is not a valid time of day: {e}"))
        })?;

        Self::from_hm(parsed.hour(), parsed.minute())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.hour(), self.minute())
    }
}
