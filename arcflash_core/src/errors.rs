//! # Error Types
//!
//! Structured error types for arcflash_core. Every failure names the field,
//! tier or coefficient that caused it so a host can tell the user exactly
//! what to correct (usually the equipment selection or an input value).
//!
//! ## Example
//!
//! ```rust
//! use arcflash_core::errors::{CalcError, CalcResult};
//!
//! fn validate_gap(gap_mm: f64) -> CalcResult<()> {
//!     if gap_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "gap_mm",
//!             gap_mm.to_string(),
//!             "Electrode gap must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_gap(-1.0).unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for arcflash_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for arc-flash evaluation.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is out of range or non-physical
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The coefficient data cannot produce a result (missing row, or a
    /// coefficient that forces a division by zero or a non-positive
    /// correction factor)
    #[error("Invalid model{}{}: {reason}", context_suffix(" for ", .configuration), context_suffix(" at ", .tier))]
    InvalidModel {
        configuration: Option<String>,
        tier: Option<String>,
        reason: String,
    },

    /// A math domain check failed (log of a non-positive operand)
    #[error("Domain violation in {operation}: operand {operand}")]
    DomainViolation { operation: String, operand: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },
}

fn context_suffix(prefix: &str, value: &Option<String>) -> String {
    value.as_ref().map(|v| format!("{}{}", prefix, v)).unwrap_or_default()
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidModel error with no configuration/tier context yet
    pub fn invalid_model(reason: impl Into<String>) -> Self {
        CalcError::InvalidModel {
            configuration: None,
            tier: None,
            reason: reason.into(),
        }
    }

    /// Create an InvalidModel error for a configuration, optionally at a tier
    pub fn invalid_model_for(
        configuration: impl Into<String>,
        tier: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidModel {
            configuration: Some(configuration.into()),
            tier: tier.map(str::to_string),
            reason: reason.into(),
        }
    }

    /// Create a DomainViolation error
    pub fn domain_violation(operation: impl Into<String>, operand: f64) -> Self {
        CalcError::DomainViolation {
            operation: operation.into(),
            operand: operand.to_string(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Fill in the configuration and tier of an InvalidModel error where
    /// they are still unknown.
    ///
    /// Context already present is kept; other variants pass through unchanged.
    pub fn with_context(self, configuration: &str, tier: Option<&str>) -> Self {
        match self {
            CalcError::InvalidModel {
                configuration: existing_configuration,
                tier: existing_tier,
                reason,
            } => CalcError::InvalidModel {
                configuration: existing_configuration.or_else(|| Some(configuration.to_string())),
                tier: existing_tier.or_else(|| tier.map(str::to_string)),
                reason,
            },
            other => other,
        }
    }

    /// Check if this is a recoverable error (e.g., can retry).
    ///
    /// The engine is deterministic, so the same input always fails the
    /// same way.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidModel { .. } => "INVALID_MODEL",
            CalcError::DomainViolation { .. } => "DOMAIN_VIOLATION",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
