use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

/// A UTC calendar day, as the half-open interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CalendarDay {
    /// The UTC day containing `instant`
    pub fn of(instant: DateTime<Utc>) -> Self {
        let start = instant
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();

        CalendarDay {
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn day(&self) -> u32 {
        self.start.day()
    }
}
