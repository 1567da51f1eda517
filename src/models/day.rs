use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Day-of-week index following the 0 = Sunday .. 6 = Saturday convention
/// stored in term working-day sets.
///
/// Serializes as the bare integer so API payloads and stored rows carry the
/// same 0–6 values the rest of the platform uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    /// Create a day from its index. Returns `None` when outside 0..=6.
    pub fn new(index: u8) -> Option<Self> {
        if index <= 6 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Raw index, 0 = Sunday .. 6 = Saturday.
    pub fn index(&self) -> u8 {
        self.0
    }

    /// English day name for display.
    pub fn name(&self) -> &'static str {
        const NAMES: [&str; 7] = [
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ];
        NAMES[self.0 as usize]
    }

    /// Day of the week a calendar date falls on.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.weekday().num_days_from_sunday() as u8)
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DayOfWeek::new(value)
            .ok_or_else(|| format!("Day index must be between 0 and 6, got {}", value))
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> Self {
        day.0
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
