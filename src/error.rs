//! Error types for the contact book.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Validation failures are not errors: they travel as violations inside a
//! rejected outcome (see `validation`). The types here cover everything that
//! should abort a request instead.

use thiserror::Error;

/// Errors raised by a contact store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be encoded or decoded
    #[error("Store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No record with the given id exists
    #[error("Contact not found: {0}")]
    NotFound(String),

    /// The write would give two records the same name
    #[error("Contact name already in use: {0}")]
    Conflict(String),

    /// The store was used before `init` completed
    #[error("Store not initialized")]
    NotInitialized,
}

/// Errors surfaced by the contact service and HTTP layer.
#[derive(Error, Debug)]
pub enum ContactBookError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Malformed request (missing id, unknown method override, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The store failed; never a validation problem
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Failed to load .env file
    #[error("Failed to load .env file: {0}")]
    DotenvError(String),
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ContactBookError
pub type ContactBookResult<T> = Result<T, ContactBookError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
