//! Date-triggered timer messages.
//!
//! A message becomes active on its trigger date and stays active from then
//! on. When several are active, the most recently triggered one wins; ties go
//! to whichever comes first in the timer's list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{parse_date, start_of_day, whole_days_between};
use crate::error::Result;

/// A message record as stored with its timer.
///
/// The trigger date is kept in its stored `YYYY-MM-DD` form; records with an
/// unparseable date are skipped at resolution time rather than rejected on
/// load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSpec {
    pub text: String,
    pub trigger_date: String,
}

impl MessageSpec {
    pub fn new(text: impl Into<String>, trigger_date: NaiveDate) -> Self {
        Self {
            text: text.into(),
            trigger_date: trigger_date.format("%Y-%m-%d").to_string(),
        }
    }

    /// The parsed trigger date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDate`](crate::EngineError::InvalidDate)
    /// if the stored date cannot be parsed.
    pub fn trigger_date(&self) -> Result<NaiveDate> {
        parse_date(&self.trigger_date)
    }

    fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// The message selected by [`resolve_active_message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveMessage {
    pub text: String,
    pub trigger_date: NaiveDate,
    /// Whole days from today until the trigger date. Always `<= 0`.
    pub days_until: i64,
}

impl ActiveMessage {
    /// `"Today"` on the trigger date, otherwise e.g. `"Since March 5, 2024"`.
    pub fn since_label(&self) -> String {
        if self.days_until == 0 {
            "Today".to_string()
        } else {
            format!("Since {}", self.trigger_date.format("%B %-d, %Y"))
        }
    }
}

/// Pick the message that is currently relevant, if any.
///
/// # Arguments
///
/// * `messages` — The timer's messages, in stored order
/// * `today` — The caller's current local date
///
/// # Returns
///
/// The active message (trigger date on or before `today`) with the most
/// recent trigger date, or `None` when nothing has triggered yet. Among
/// messages sharing that date, the first in `messages` wins. Messages with
/// empty text or an unparseable trigger date are ignored.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use daycount_engine::{resolve_active_message, MessageSpec};
///
/// let d = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
/// let messages = vec![MessageSpec::new("A", d(1, 1)), MessageSpec::new("B", d(1, 10))];
///
/// let active = resolve_active_message(&messages, d(1, 15)).unwrap();
/// assert_eq!(active.text, "B");
/// assert_eq!(active.days_until, -5);
/// ```
pub fn resolve_active_message(messages: &[MessageSpec], today: NaiveDate) -> Option<ActiveMessage> {
    let today_start = start_of_day(today);

    let (_, best, trigger_date, days_until) = messages
        .iter()
        .enumerate()
        .filter_map(|(index, message)| {
            if !message.has_text() {
                tracing::debug!(index, "skipping message with empty text");
                return None;
            }
            match message.trigger_date() {
                Ok(date) => {
                    let days_until = whole_days_between(today_start, start_of_day(date));
                    Some((index, message, date, days_until))
                }
                Err(err) => {
                    tracing::debug!(index, %err, "skipping message with unparseable trigger date");
                    None
                }
            }
        })
        .filter(|(_, _, _, days_until)| *days_until <= 0)
        // Strict `>` keeps the earliest of equal candidates.
        .reduce(|best, candidate| if candidate.3 > best.3 { candidate } else { best })?;

    Some(ActiveMessage {
        text: best.text.clone(),
        trigger_date,
        days_until,
    })
}
