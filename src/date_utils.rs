use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;

/// A calendar month with no day component. Every month-scoped query takes one
/// of these explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

/// Inclusive `[start, end]` range of unix seconds covering one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthWindow {
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMonth(pub String);

impl fmt::Display for InvalidMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid month '{}', expected YYYY-MM", self.0)
    }
}

impl std::error::Error for InvalidMonth {}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        // Keep the year where chrono can still build the following month.
        if !(1..=12).contains(&month) || !(1..=9998).contains(&year) {
            return None;
        }
        Some(Self { year, month })
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn prev(&self) -> Self {
        self.shift(-1)
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    fn shift(&self, months: i32) -> Self {
        let total_months = self.year * 12 + self.month as i32 - 1 + months;
        let shifted = Self {
            year: total_months.div_euclid(12),
            month: (total_months.rem_euclid(12) + 1) as u32,
        };
        // Stay put at the edges of the supported range.
        Self::new(shifted.year, shifted.month).unwrap_or(*self)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// "January 2024"
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// "2024-01", the form accepted by [`MonthCursor::from_str`].
    pub fn query_value(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Month window in the process-local time zone.
    pub fn window(&self) -> MonthWindow {
        self.window_in(&Local)
    }

    /// Start is the first instant of the month; end is one millisecond before
    /// the next month starts. Both are floored to whole seconds.
    pub fn window_in<Tz: TimeZone>(&self, tz: &Tz) -> MonthWindow {
        let start_ms = month_start_millis(self, tz);
        let end_ms = month_start_millis(&self.next_unbounded(), tz) - 1;

        MonthWindow {
            start: start_ms.div_euclid(1000),
            end: end_ms.div_euclid(1000),
        }
    }

    /// Like `next`, but never clamps, so the last supported month still gets
    /// a proper end boundary.
    fn next_unbounded(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_value())
    }
}

impl FromStr for MonthCursor {
    type Err = InvalidMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

/// First instant of `month` in `tz`, in unix milliseconds. When local
/// midnight falls in a DST gap, the earliest valid instant after it is used.
fn month_start_millis<Tz: TimeZone>(month: &MonthCursor, tz: &Tz) -> i64 {
    let midnight = month.first_day().and_hms_opt(0, 0, 0).unwrap_or_default();
    let start: DateTime<Utc> = match tz.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => (1..=3)
            .filter_map(|hour| {
                let shifted = midnight + chrono::Duration::hours(hour);
                tz.from_local_datetime(&shifted).earliest()
            })
            .next()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight)),
    };
    start.timestamp_millis()
}
