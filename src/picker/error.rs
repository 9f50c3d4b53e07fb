use chrono::NaiveDate;
use thiserror::Error;

/// Text that could not be turned into a calendar date.
///
/// Raised for both structural mismatches ("2024-0") and impossible dates
/// ("2024-02-30"). Controllers swallow it: a half-typed value is not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{text}' does not match '{pattern}': {reason}")]
pub struct ParseFailure {
    pub text: String,
    pub pattern: String,
    pub reason: String,
}

/// A well-formed date rejected by min/max/disabled rules
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    #[error("{day} is before the earliest selectable day {min}")]
    BeforeMin { day: NaiveDate, min: NaiveDate },

    #[error("{day} is after the latest selectable day {max}")]
    AfterMax { day: NaiveDate, max: NaiveDate },

    #[error("{0} is disabled")]
    Disabled(NaiveDate),
}

/// Configuration-time errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("Invalid date pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Unknown locale '{0}'")]
    UnknownLocale(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Parse(#[from] ParseFailure),

    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),
}

/// Result type for picker configuration
pub type PickerResult<T> = Result<T, PickerError>;
