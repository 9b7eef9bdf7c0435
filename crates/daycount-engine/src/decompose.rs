//! Calendar-aware breakdown of the span covered by a timer.
//!
//! A timer is anchored to a calendar date and either counts up from it or
//! counts down to it. [`decompose`] turns the span between the anchor (taken
//! at midnight) and the caller's "now" into years, months, weeks and days,
//! honouring real month lengths and leap years.
//!
//! The [`Pivot`] picks the largest unit the caller wants to see. Coarser units
//! are folded into the pivot unit rather than dropped, so a Weeks pivot on a
//! two-year span reports roughly 104 weeks.
//!
//! Like the rest of the crate, nothing here reads the system clock.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar::{advance_whole_months, advance_whole_years, start_of_day, whole_days_between};
use crate::error::EngineError;

// ── Direction ───────────────────────────────────────────────────────────────

/// Which way a timer measures time relative to its anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Elapsed time since the anchor date.
    CountUp,
    /// Remaining time until the anchor date.
    CountDown,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::CountUp => f.write_str("count up"),
            Direction::CountDown => f.write_str("count down"),
        }
    }
}

// ── Pivot ───────────────────────────────────────────────────────────────────

/// The largest unit shown in a breakdown.
///
/// Stored by callers as an index 0-3. It is view state, so a freshly opened
/// timer starts at the default, [`Pivot::Years`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Pivot {
    #[default]
    Years,
    Months,
    Weeks,
    Days,
}

impl Pivot {
    /// All pivots, in index order.
    pub const ALL: [Pivot; 4] = [Pivot::Years, Pivot::Months, Pivot::Weeks, Pivot::Days];

    /// The 0-3 index used by callers to persist or cycle the selection.
    pub fn as_index(self) -> u8 {
        match self {
            Pivot::Years => 0,
            Pivot::Months => 1,
            Pivot::Weeks => 2,
            Pivot::Days => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Pivot::Years => "years",
            Pivot::Months => "months",
            Pivot::Weeks => "weeks",
            Pivot::Days => "days",
        }
    }
}

impl TryFrom<u8> for Pivot {
    type Error = EngineError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Pivot::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(EngineError::InvalidPivot(index))
    }
}

// ── DurationBreakdown ───────────────────────────────────────────────────────

/// The derived view of a timer at one instant. Recomputed on every refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationBreakdown {
    pub years: u32,
    pub months: u32,
    pub weeks: i64,
    pub days: i64,
    /// Whole 24-hour days across the full span, regardless of pivot.
    pub total_whole_days: i64,
    /// The effective end of the span precedes its start. For a count-down
    /// timer the target has passed; for a count-up timer the anchor is still
    /// in the future. Every other field is zero when this is set.
    pub is_expired: bool,
}

impl DurationBreakdown {
    /// The all-zero breakdown reported for an expired (or not yet started) timer.
    pub fn expired() -> Self {
        Self {
            is_expired: true,
            ..Self::default()
        }
    }

    /// Human-readable form, e.g. `"1 year, 2 months, 3 days"`.
    ///
    /// Zero units are omitted; an all-zero breakdown reads `"0 days"`.
    pub fn human_readable(&self) -> String {
        let units = [
            (i64::from(self.years), "year"),
            (i64::from(self.months), "month"),
            (self.weeks, "week"),
            (self.days, "day"),
        ];
        let parts: Vec<String> = units
            .iter()
            .filter(|(n, _)| *n != 0)
            .map(|(n, unit)| format!("{} {}{}", n, unit, if *n == 1 { "" } else { "s" }))
            .collect();
        if parts.is_empty() {
            "0 days".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.human_readable())
    }
}

// ── decompose ───────────────────────────────────────────────────────────────

/// Break down the span between a timer's anchor date and `now`.
///
/// # Arguments
///
/// * `anchor` — The timer's anchor date, taken at 00:00:00
/// * `direction` — [`Direction::CountUp`] measures anchor → now,
///   [`Direction::CountDown`] measures now → anchor
/// * `now` — The caller's current local wall-clock instant
/// * `pivot` — The largest unit to report
///
/// # Returns
///
/// A [`DurationBreakdown`]. If the effective end precedes the effective start
/// the breakdown is all zeros with `is_expired` set; a span of zero is not
/// expired.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use daycount_engine::{decompose, Direction, Pivot};
///
/// let anchor = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
/// let now = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// let b = decompose(anchor, Direction::CountUp, now, Pivot::Years);
/// assert_eq!((b.years, b.months, b.weeks, b.days), (1, 0, 0, 1));
/// assert_eq!(b.total_whole_days, 366);
/// ```
pub fn decompose(
    anchor: NaiveDate,
    direction: Direction,
    now: NaiveDateTime,
    pivot: Pivot,
) -> DurationBreakdown {
    let anchor_start = start_of_day(anchor);
    let (from, to) = match direction {
        Direction::CountUp => (anchor_start, now),
        Direction::CountDown => (now, anchor_start),
    };
    decompose_span(from, to, pivot)
}

/// Break down the span `from → to` directly. [`decompose`] is this function
/// with `from`/`to` chosen by direction.
pub fn decompose_span(from: NaiveDateTime, to: NaiveDateTime, pivot: Pivot) -> DurationBreakdown {
    if to < from {
        tracing::trace!(%from, %to, "span is reversed, reporting expired");
        return DurationBreakdown::expired();
    }

    let total_whole_days = whole_days_between(from, to);

    let breakdown = match pivot {
        Pivot::Years => {
            let (years, after_years) = advance_whole_years(from, to);
            let (months, after_months) = advance_whole_months(after_years, to);
            let remainder = whole_days_between(after_months, to);
            DurationBreakdown {
                years,
                months,
                weeks: remainder / 7,
                days: remainder % 7,
                total_whole_days,
                is_expired: false,
            }
        }
        Pivot::Months => {
            let (months, after_months) = advance_whole_months(from, to);
            let remainder = whole_days_between(after_months, to);
            DurationBreakdown {
                years: 0,
                months,
                weeks: remainder / 7,
                days: remainder % 7,
                total_whole_days,
                is_expired: false,
            }
        }
        Pivot::Weeks => DurationBreakdown {
            weeks: total_whole_days / 7,
            days: total_whole_days % 7,
            total_whole_days,
            ..DurationBreakdown::default()
        },
        Pivot::Days => DurationBreakdown {
            days: total_whole_days,
            total_whole_days,
            ..DurationBreakdown::default()
        },
    };

    tracing::trace!(?pivot, ?breakdown, "decomposed span");
    breakdown
}
