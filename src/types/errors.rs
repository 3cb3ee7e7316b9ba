//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.
//!
//! Ordinary operational failures (upstream network down, unsatisfiable area
//! selection) never become an `Error`: they collapse to the tool's declared
//! fallback value inside the catalog. What remains here is the
//! caller-contract surface — unknown tools, missing required parameters,
//! transport problems on the IPC socket itself.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the tool service.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation errors (missing/ill-typed required parameters).
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found (unknown tool or IPC method).
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal errors.
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Convert to the error code carried in IPC error frames.
    pub fn to_ipc_error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "INVALID_ARGUMENT",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Internal(_) | Error::Serialization(_) | Error::Io(_) => "INTERNAL",
        }
    }
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
