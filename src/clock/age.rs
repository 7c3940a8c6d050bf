//! Calendar-correct age computation.
//!
//! Splits the time elapsed since a birthdate into whole years plus the
//! days and wall-clock time since the most recent birthday.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::fmt;

/// Textual pattern of a birthdate in config and in the details popup.
pub const BIRTHDATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Glyph shown in front of the age string.
pub const AGE_GLYPH: &str = "\u{1F480}";

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;

/// Birthdate used when none can be loaded: 2000-01-01 00:00:00.
pub const DEFAULT_BIRTHDATE: NaiveDateTime = match NaiveDate::from_ymd_opt(2000, 1, 1) {
    Some(date) => date.and_time(chrono::NaiveTime::MIN),
    None => NaiveDateTime::MIN,
};

/// Elapsed lifetime split at the last birthday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AgeBreakdown {
    /// Completed years
    pub years: i32,
    /// Days since the last birthday anniversary
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl fmt::Display for AgeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}y {}d {:02}:{:02}:{:02}",
            self.years, self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Whole days and hours since the birthdate itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTotals {
    pub days: i64,
    pub hours: i64,
}

/// Compute the age at `now` of someone born at `birthdate`.
///
/// `now` earlier than `birthdate` is not rejected; the result is then
/// negative but still deterministic.
pub fn compute_age(birthdate: NaiveDateTime, now: NaiveDateTime) -> AgeBreakdown {
    let mut years = now.year() - birthdate.year();
    if now < anniversary(birthdate, now.year()) {
        years -= 1;
    }

    let last_birthday = anniversary(birthdate, birthdate.year() + years);
    let total_seconds = (now - last_birthday).num_seconds();
    let remainder = total_seconds.rem_euclid(SECONDS_PER_DAY);

    AgeBreakdown {
        years,
        days: total_seconds.div_euclid(SECONDS_PER_DAY),
        hours: remainder / SECONDS_PER_HOUR,
        minutes: (remainder % SECONDS_PER_HOUR) / 60,
        seconds: remainder % 60,
    }
}

/// The birthdate's month/day/time realised in `year`.
///
/// A Feb 29 birthdate falls on March 1 in years without a leap day.
pub fn anniversary(birthdate: NaiveDateTime, year: i32) -> NaiveDateTime {
    birthdate
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1).map(|date| date.and_time(birthdate.time())))
        .unwrap_or(birthdate)
}

/// Render an age as the overlay label, e.g. `💀 24y 12d 03:04:05`.
pub fn format_age(age: &AgeBreakdown) -> String {
    format!("{} {}", AGE_GLYPH, age)
}

/// Total whole days and hours between `birthdate` and `now`.
pub fn total_elapsed(birthdate: NaiveDateTime, now: NaiveDateTime) -> ElapsedTotals {
    let seconds = (now - birthdate).num_seconds();
    ElapsedTotals {
        days: seconds.div_euclid(SECONDS_PER_DAY),
        hours: seconds.div_euclid(SECONDS_PER_HOUR),
    }
}

/// Format an integer with `,` between groups of three digits.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
