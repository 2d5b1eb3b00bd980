//! Local calendar helpers.
//!
//! The board runs in the process-local timezone: day boundaries for the
//! scheduler and reconciler, weekday/time-of-day buckets and the forecast
//! date/hour of a departure all derive from [`chrono::Local`].

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

/// Half-open `[start, end)` window covering one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The local calendar day containing `now`.
    #[must_use]
    pub fn containing(now: DateTime<Utc>) -> Self {
        let date = now.with_timezone(&Local).date_naive();
        Self::for_date(date)
    }

    /// The window for a given local calendar date.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        let next = date.succ_opt().unwrap_or(date);
        Self {
            start: local_midnight(date),
            end: local_midnight(next),
        }
    }

    /// Whether `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// Local calendar date and hour (0–23) of an instant.
#[must_use]
pub fn local_date_hour(instant: DateTime<Utc>) -> (NaiveDate, u32) {
    let local = instant.with_timezone(&Local);
    (local.date_naive(), local.hour())
}

/// Convert a local wall-clock time to UTC.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times that
/// do not exist locally (DST spring-forward) are shifted forward by an hour.
#[must_use]
pub fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(naive + chrono::Duration::hours(1)))
                .earliest()
        })
        .map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc))
}

fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    local_to_utc(date.and_time(chrono::NaiveTime::MIN))
}
