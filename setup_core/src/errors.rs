//! # Error Types
//!
//! Structured error types for setup_core. Every failure a caller can act on
//! has its own variant so that a host (CLI, GUI, service) can tell a stiffness
//! lookup miss apart from an I/O problem without parsing strings.
//!
//! Division guards in the pressure engine are *not* errors: a zero hot
//! pressure or a missing temperature yields a defined value instead.
//!
//! ## Example
//!
//! ```rust
//! use setup_core::calculations::stiffness::axle_stiffness;
//! use setup_core::errors::CalcError;
//! use setup_core::tables::Axle;
//!
//! match axle_stiffness(Axle::Front, [2.0, 2.5]) {
//!     Err(CalcError::PositionNotTabulated { position, .. }) => assert_eq!(position, 2.25),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tables::Axle;

/// Result type alias for setup_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and export operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The average of two bar positions has no exact entry in the axle table
    #[error("Position {position} is not tabulated for the {axle} ARB")]
    PositionNotTabulated { axle: Axle, position: f64 },

    /// Wing position outside the balance map
    #[error("Wing position P{position} has no balance entry")]
    WingPositionUnknown { position: u8 },

    /// Report export was asked to write zero sessions
    #[error("Nothing to export: no sessions recorded")]
    NothingToExport,

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON or report serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
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

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a PositionNotTabulated error
    pub fn position_not_tabulated(axle: Axle, position: f64) -> Self {
        CalcError::PositionNotTabulated { axle, position }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Whether the caller can fix this by changing its inputs and retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CalcError::PositionNotTabulated { .. }
                | CalcError::WingPositionUnknown { .. }
                | CalcError::InvalidInput { .. }
                | CalcError::NothingToExport
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::PositionNotTabulated { .. } => "POSITION_NOT_TABULATED",
            CalcError::WingPositionUnknown { .. } => "WING_POSITION_UNKNOWN",
            CalcError::NothingToExport => "NOTHING_TO_EXPORT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}
