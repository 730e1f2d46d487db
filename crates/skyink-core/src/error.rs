//! Error handling for SkyInk
//!
//! Provides the error types shared by all pipeline stages:
//! - Configuration errors (invalid numeric parameters, caught before any work)
//! - Geometry errors (input that breaks a structural invariant)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Configuration error type
///
/// Raised when a caller hands the core a numeric parameter that would make
/// the computation meaningless (negative tolerance, zero acceleration, a
/// latitude beyond the poles, ...).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Value is NaN or infinite
    #[error("Parameter '{name}' must be finite, got {value}")]
    NotFinite {
        /// The parameter name.
        name: String,
        /// The offending value.
        value: f64,
    },

    /// Value must be zero or greater
    #[error("Parameter '{name}' must not be negative, got {value}")]
    Negative {
        /// The parameter name.
        name: String,
        /// The offending value.
        value: f64,
    },

    /// Value must be strictly greater than zero
    #[error("Parameter '{name}' must be positive, got {value}")]
    NotPositive {
        /// The parameter name.
        name: String,
        /// The offending value.
        value: f64,
    },

    /// Value is outside an inclusive range
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        /// The parameter name.
        name: String,
        /// The offending value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
}

impl ConfigurationError {
    /// Check that `value` is finite.
    pub fn require_finite(name: &str, value: f64) -> std::result::Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NotFinite {
                name: name.to_string(),
                value,
            })
        }
    }

    /// Check that `value` is finite and `>= 0`.
    pub fn require_non_negative(name: &str, value: f64) -> std::result::Result<f64, Self> {
        let value = Self::require_finite(name, value)?;
        if value < 0.0 {
            return Err(Self::Negative {
                name: name.to_string(),
                value,
            });
        }
        Ok(value)
    }

    /// Check that `value` is `>= 0`, allowing `+inf` as "no limit".
    pub fn require_non_negative_or_unbounded(
        name: &str,
        value: f64,
    ) -> std::result::Result<f64, Self> {
        if value == f64::INFINITY {
            return Ok(value);
        }
        Self::require_non_negative(name, value)
    }

    /// Check that `value` is finite and `> 0`.
    pub fn require_positive(name: &str, value: f64) -> std::result::Result<f64, Self> {
        let value = Self::require_finite(name, value)?;
        if value <= 0.0 {
            return Err(Self::NotPositive {
                name: name.to_string(),
                value,
            });
        }
        Ok(value)
    }

    /// Check that `value` lies within `min..=max`.
    pub fn require_in_range(
        name: &str,
        value: f64,
        min: f64,
        max: f64,
    ) -> std::result::Result<f64, Self> {
        let value = Self::require_finite(name, value)?;
        if value < min || value > max {
            return Err(Self::OutOfRange {
                name: name.to_string(),
                value,
                min,
                max,
            });
        }
        Ok(value)
    }
}

/// Main error type for SkyInk operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A configuration parameter was rejected
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Input geometry violates a structural invariant
    #[error("Geometry error: {0}")]
    Geometry(String),
}

impl Error {
    /// Create a geometry error from a message
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }
}

/// Result type alias for SkyInk operations
pub type Result<T> = std::result::Result<T, Error>;
