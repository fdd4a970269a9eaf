//! Clock abstraction for report timestamps
//!
//! Reports bucket queries relative to "now" (start of day, start of week,
//! trailing windows). A fixed clock makes identical read-only batches
//! reproducible in tests.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

/// Source of the current time for report builders
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// Real wall-clock time
    #[default]
    System,
    /// A pinned instant, for deterministic report output
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(at) => *at,
        }
    }

    /// Midnight of the current day
    pub fn start_of_day(&self) -> DateTime<Utc> {
        let now = self.now();
        Utc.with_ymd_and_hms(now.year(), now.month(), now.day(), 0, 0, 0)
            .single()
            .unwrap_or(now)
    }

    /// Midnight of the first day of the current month
    pub fn start_of_month(&self) -> DateTime<Utc> {
        let now = self.now();
        Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(now)
    }

    /// The same time of day on the most recent Sunday
    pub fn start_of_week(&self) -> DateTime<Utc> {
        let now = self.now();
        now - Duration::days(i64::from(now.weekday().num_days_from_sunday()))
    }

    /// The same time of day `days` days ago
    pub fn days_ago(&self, days: u32) -> DateTime<Utc> {
        self.now() - Duration::days(i64::from(days))
    }
}
