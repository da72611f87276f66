//! Game-specific error types.
//!
//! Only construction-time code returns errors: configuration validation,
//! probability-table building, and world building.  The per-tick simulation
//! never fails; out-of-range values are clamped where they occur.

use thiserror::Error;

/// Top-level error enum for world, table and configuration construction.
#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    /// A configured constant is outside its safe operating range.
    #[error("constant '{name}' = {value} is outside safe range {safe_range}")]
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// A resource probability table was built from zero entries, or every
    /// entry had zero weight.
    #[error("resource probability table has no positive weight")]
    EmptyProbabilityTable,

    /// A single probability was negative or not finite.
    #[error("resource '{resource}' has invalid probability {probability}")]
    InvalidProbability {
        resource: &'static str,
        probability: f64,
    },

    /// The world was built without any massive bodies.
    #[error("body registry is empty; gravity needs at least one body")]
    EmptyBodyRegistry,

    /// A body spec had a non-finite position, non-positive radius or negative mass.
    #[error("body '{name}' is invalid: {reason}")]
    InvalidBody { name: String, reason: &'static str },
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(name: &'static str, value: f64) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn validate_non_negative(name: &'static str, value: f64) -> GameResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}
