//! # DomainError
//!
//! Centralized error handling for the admin panel.
//! Maps store, hashing, and token failures to actionable error types.

use thiserror::Error;

/// Message shown for every failed sign-in, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// The primary error type crossing every port.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Resource not found (e.g., Persona, Article)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., missing title, unknown author)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Sign-in failed. Deliberately says nothing about which half was wrong.
    #[error("{}", INVALID_CREDENTIALS)]
    InvalidCredentials,

    /// Missing, expired, or forged session token
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists (e.g., duplicate admin email)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., DB down, hashing backend error)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound(entity.to_string(), id.to_string())
    }
}

/// A specialized Result type for domain logic.
pub type Result<T> = std::result::Result<T, DomainError>;
