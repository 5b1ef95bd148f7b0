//! Error types for the calculation engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the business case engine.
///
/// An undefined payback period is not an error; it is reported through
/// [`crate::core::roi::PaybackPeriod::NotApplicable`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Unknown currency or scenario, or an unusable configuration table entry.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An input value the model cannot accept.
    #[error("Invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        Error::InvalidInput {
            field,
            value,
            reason,
        }
    }
}

/// Rejects NaN, infinite and negative values.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(field, value, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(Error::invalid(field, value, "must not be negative"));
    }
    Ok(())
}

/// Rejects anything outside `[0, 1]`; rates are stored as fractions.
pub(crate) fn ensure_fraction(field: &'static str, value: f64) -> Result<()> {
    ensure_non_negative(field, value)?;
    if value > 1.0 {
        return Err(Error::invalid(
            field,
            value,
            "must be a fraction between 0 and 1",
        ));
    }
    Ok(())
}
