//! # AppError
//!
//! Centralized error handling for the Foyer ecosystem. Maps
//! domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (message id, image filename).
    #[error("{0} not found: {1}")]
    NotFound(String, String),

    /// Caller input failed validation (empty message text, bad
    /// filename, non-image upload).
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The session role does not satisfy an operation's required
    /// roles. Never logged as a system fault.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure (store write, filesystem).
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for Foyer logic.
pub type Result<T> = std::result::Result<T, AppError>;
