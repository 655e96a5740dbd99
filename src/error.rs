//! Error types for the panel optimizer.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for optimizer failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Provider file not found (-1)
    FileNotFound = -1,
    /// Provider data could not be decoded (-3)
    ParseError = -3,
    /// Inventory is empty (E100)
    NoPanels = 100,
    /// Unknown strategy tag (E103)
    UnknownStrategy = 103,
    /// Request failed validation (E200)
    InvalidInput = 200,
}

/// Main error type for the optimizer.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("No panels supplied")]
    NoPanels,

    #[error("Unknown strategy: '{tag}'")]
    UnknownStrategy { tag: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OptimizeError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            OptimizeError::FileNotFound { .. } => ErrorCode::FileNotFound,
            OptimizeError::NoPanels => ErrorCode::NoPanels,
            OptimizeError::UnknownStrategy { .. } => ErrorCode::UnknownStrategy,
            OptimizeError::InvalidInput { .. } => ErrorCode::InvalidInput,
            OptimizeError::Io(_) => ErrorCode::FileNotFound,
            OptimizeError::Json(_) => ErrorCode::ParseError,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// Whether this error is a request validation failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::NoPanels | ErrorCode::UnknownStrategy | ErrorCode::InvalidInput
        )
    }
}

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizeError>;
