//! Error types shared by every calculator in the crate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a calculation is refused.
///
/// Every variant is raised while validating input, before any table is
/// filled, so an error never comes with a partially computed result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A scalar input fell outside its allowed interval.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },

    /// Numeric input that is structurally wrong for the calculation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Input that would make the recurrence produce NaN or infinity.
    #[error("degenerate input: {0}")]
    Degenerate(String),

    /// An imported document that is not JSON or lacks required fields.
    #[error("malformed document: {0}")]
    Malformed(String),
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        Error::Degenerate(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::Malformed(msg.into())
    }

    /// Builds an [`Error::OutOfRange`] from any displayable bounds.
    pub fn out_of_range(
        field: &'static str,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Error::OutOfRange {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}
