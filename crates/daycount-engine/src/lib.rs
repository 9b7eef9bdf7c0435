//! # daycount-engine
//!
//! Deterministic calendar breakdowns for countdown and count-up timers.
//!
//! A timer is anchored to a calendar date. Given the caller's "now", the
//! engine reports the span as years, months, weeks and days using real month
//! lengths and leap years, and picks which of the timer's date-triggered
//! messages is currently relevant. Nothing here reads the system clock or
//! touches storage; the host passes records and time in.
//!
//! ## Modules
//!
//! - [`calendar`] — Month/year advancing with borrow correction, whole-day differences, date parsing
//! - [`decompose`] — Span → years/months/weeks/days with a largest-unit pivot
//! - [`message`] — Active message resolution
//! - [`timer`] — Timer records, validation, and the per-refresh view
//! - [`error`] — Error types

pub mod calendar;
pub mod decompose;
pub mod error;
pub mod message;
pub mod timer;

pub use calendar::{parse_date, parse_instant};
pub use decompose::{decompose, decompose_span, Direction, DurationBreakdown, Pivot};
pub use error::EngineError;
pub use message::{resolve_active_message, ActiveMessage, MessageSpec};
pub use timer::{TimerSpec, TimerSummary, TimerView, MAX_MESSAGES};
