//! Timer records and the per-refresh view computed from them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar::parse_date;
use crate::decompose::{decompose, Direction, DurationBreakdown, Pivot};
use crate::error::{EngineError, Result};
use crate::message::{resolve_active_message, ActiveMessage, MessageSpec};

/// Most messages a timer may carry. Enforced by [`TimerSpec::validate`] only;
/// resolution handles any number.
pub const MAX_MESSAGES: usize = 5;

/// A timer record as persisted by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSpec {
    pub name: String,
    /// Stored `YYYY-MM-DD`.
    pub anchor_date: String,
    pub direction: Direction,
    #[serde(default)]
    pub messages: Vec<MessageSpec>,
}

/// List-screen summary: total whole days, independent of any pivot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSummary {
    pub name: String,
    pub direction: Direction,
    pub total_whole_days: i64,
    pub is_expired: bool,
}

/// Everything a detail view shows on one refresh tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerView {
    pub name: String,
    pub direction: Direction,
    pub pivot: Pivot,
    pub breakdown: DurationBreakdown,
    pub active_message: Option<ActiveMessage>,
}

impl TimerSpec {
    pub fn new(name: impl Into<String>, anchor: NaiveDate, direction: Direction) -> Self {
        Self {
            name: name.into(),
            anchor_date: anchor.format("%Y-%m-%d").to_string(),
            direction,
            messages: Vec::new(),
        }
    }

    pub fn with_message(mut self, text: impl Into<String>, trigger_date: NaiveDate) -> Self {
        self.messages.push(MessageSpec::new(text, trigger_date));
        self
    }

    /// The parsed anchor date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDate`] if the stored date cannot be parsed.
    pub fn anchor(&self) -> Result<NaiveDate> {
        parse_date(&self.anchor_date)
    }

    /// Check the record against the rules the edit form enforces.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: [`EngineError::EmptyName`],
    /// [`EngineError::InvalidDate`] for the anchor or any trigger date,
    /// [`EngineError::EmptyMessage`], or [`EngineError::TooManyMessages`].
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::EmptyName);
        }
        self.anchor()?;
        if self.messages.len() > MAX_MESSAGES {
            return Err(EngineError::TooManyMessages {
                count: self.messages.len(),
                max: MAX_MESSAGES,
            });
        }
        for (index, message) in self.messages.iter().enumerate() {
            if message.text.trim().is_empty() {
                return Err(EngineError::EmptyMessage { index });
            }
            message.trigger_date()?;
        }
        Ok(())
    }

    /// Breakdown at `now`. An unparseable anchor date reports as expired.
    pub fn breakdown(&self, now: NaiveDateTime, pivot: Pivot) -> DurationBreakdown {
        match self.anchor() {
            Ok(anchor) => decompose(anchor, self.direction, now, pivot),
            Err(err) => {
                tracing::debug!(timer = %self.name, %err, "unparseable anchor date, reporting expired");
                DurationBreakdown::expired()
            }
        }
    }

    pub fn summary(&self, now: NaiveDateTime) -> TimerSummary {
        let breakdown = self.breakdown(now, Pivot::Days);
        TimerSummary {
            name: self.name.clone(),
            direction: self.direction,
            total_whole_days: breakdown.total_whole_days,
            is_expired: breakdown.is_expired,
        }
    }

    /// Compute the breakdown and the active message for one refresh tick.
    pub fn refresh(&self, now: NaiveDateTime, pivot: Pivot) -> TimerView {
        TimerView {
            name: self.name.clone(),
            direction: self.direction,
            pivot,
            breakdown: self.breakdown(now, pivot),
            active_message: resolve_active_message(&self.messages, now.date()),
        }
    }
}
