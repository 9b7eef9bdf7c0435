//! Calendar-delta primitives shared by the decomposer and the message resolver.
//!
//! Everything here works on naive (zone-less) local wall-clock values. Month
//! arithmetic follows chrono's rules: adding months keeps the day of month and
//! clamps to the last day of a shorter target month (Jan 31 + 1 month is
//! Feb 28, or Feb 29 in a leap year).
//!
//! The "advance" helpers answer the borrow-correction question directly: the
//! largest whole number of months (or years) that can be added to `from`
//! without passing `to`, together with the shifted instant. Because the
//! shifted instant never passes `to`, the remainder handed to the day count is
//! never negative.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{EngineError, Result};

/// Instant formats accepted by [`parse_instant`], tried in order.
const INSTANT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`] if the string is not a valid date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|e| EngineError::InvalidDate(format!("'{}': {}", trimmed, e)))
}

/// Parse a local wall-clock instant.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]` (a space may replace the `T`) or a
/// bare `YYYY-MM-DD`, which is read as the start of that day.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`] if none of the formats match.
pub fn parse_instant(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    INSTANT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map_or_else(|| parse_date(trimmed).map(start_of_day), Ok)
        .map_err(|_| EngineError::InvalidDate(format!("'{}': not a date or datetime", trimmed)))
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Add `months` calendar months to `instant`, clamping the day of month.
///
/// Returns `None` if the result falls outside chrono's representable range.
pub fn add_months(instant: NaiveDateTime, months: u32) -> Option<NaiveDateTime> {
    instant.checked_add_months(Months::new(months))
}

/// Whole 24-hour days from `from` to `to`, truncated toward zero.
///
/// Negative when `to` is before `from`.
pub fn whole_days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Whole calendar months from `from` to `to`. Zero when `to <= from`.
pub fn whole_months_between(from: NaiveDateTime, to: NaiveDateTime) -> u32 {
    advance_whole_months(from, to).0
}

/// Whole years (12-month periods) from `from` to `to`. Zero when `to <= from`.
pub fn whole_years_between(from: NaiveDateTime, to: NaiveDateTime) -> u32 {
    advance_whole_years(from, to).0
}

/// The largest month count `n` with `from + n months <= to`, and that instant.
pub fn advance_whole_months(from: NaiveDateTime, to: NaiveDateTime) -> (u32, NaiveDateTime) {
    let span = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    advance(from, to, span, 1)
}

/// The largest year count `n` with `from + 12n months <= to`, and that instant.
pub fn advance_whole_years(from: NaiveDateTime, to: NaiveDateTime) -> (u32, NaiveDateTime) {
    advance(from, to, to.year() - from.year(), 12)
}

/// Walk `candidate` down until `from + candidate * step` months no longer
/// passes `to`. The candidate comes from a component subtraction, so it is
/// at most one step too large; the loop borrows that step back.
fn advance(
    from: NaiveDateTime,
    to: NaiveDateTime,
    candidate: i32,
    step: u32,
) -> (u32, NaiveDateTime) {
    let mut count = u32::try_from(candidate).unwrap_or(0);
    while count > 0 {
        let shifted = count
            .checked_mul(step)
            .and_then(|months| add_months(from, months));
        match shifted {
            Some(instant) if instant <= to => return (count, instant),
            _ => count -= 1,
        }
    }
    (0, from)
}
