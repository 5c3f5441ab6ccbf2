//! werkstatt-errors - unified error handling
//!
//! Every fallible operation in the workspace returns [`AppResult`]. The
//! variants mirror how failures are surfaced to the operator: invalid input
//! is rejected where it is entered, invariant violations block the operation
//! without mutating anything, and storage failures carry the underlying
//! cause for diagnostics.

use thiserror::Error;

/// Application error taxonomy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-range user input. The operation is aborted
    /// before any write happens.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation would violate a data invariant (dangling references,
    /// duplicate invoice, deleting a paid invoice). Nothing is mutated.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A required configuration value is absent or unreadable at
    /// computation time. Computations fail instead of assuming defaults.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The storage layer failed; the message carries the underlying cause.
    /// Multi-statement operations roll back before this is returned.
    #[error("Database error: {0}")]
    Database(String),

    /// A failure with no user-facing category, e.g. a report that could
    /// not be rendered. Carries the underlying cause for diagnostics.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error is something the operator can fix by changing
    /// input (as opposed to a storage or configuration fault).
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Constraint(_))
    }
}

/// Result alias used across the workspace.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::validation("quantity must be positive");
        assert_eq!(err.to_string(), "Validation error: quantity must be positive");

        let err = AppError::database("disk I/O error");
        assert_eq!(err.to_string(), "Database error: disk I/O error");
    }

    #[test]
    fn test_is_user_error() {
        assert!(AppError::validation("x").is_user_error());
        assert!(AppError::constraint("x").is_user_error());
        assert!(!AppError::configuration("x").is_user_error());
        assert!(!AppError::database("x").is_user_error());
        assert!(!AppError::not_found("x").is_user_error());
        assert!(!AppError::internal("x").is_user_error());
    }
}
