//! Error types for daycount-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid pivot: {0} (expected 0-3)")]
    InvalidPivot(u8),

    #[error("Timer name is empty")]
    EmptyName,

    #[error("Message {index} has empty text")]
    EmptyMessage { index: usize },

    #[error("Too many messages: {count} (at most {max})")]
    TooManyMessages { count: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;
