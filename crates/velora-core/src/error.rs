//! Unified error types for all layers of the application.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Velora.
#[derive(Error, Debug)]
pub enum VeloraError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate slug or SKU)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VeloraError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Database(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is retriable.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Cache(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for VeloraError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // Check for unique constraint violation
                if let Some(code) = db_err.code() {
                    if code == "23505" || code == "1062" {
                        // PostgreSQL / MySQL unique violation
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for VeloraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(VeloraError::not_found("Product", 1).status_code(), 404);
        assert_eq!(VeloraError::validation("missing sku").status_code(), 400);
        assert_eq!(VeloraError::conflict("duplicate slug").status_code(), 409);
        assert_eq!(VeloraError::cache("unreachable").status_code(), 500);
        assert_eq!(VeloraError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(VeloraError::not_found("Product", 1).error_code(), "NOT_FOUND");
        assert_eq!(VeloraError::validation("bad input").error_code(), "VALIDATION_ERROR");
        assert_eq!(VeloraError::conflict("duplicate").error_code(), "CONFLICT");
        assert_eq!(VeloraError::cache("down").error_code(), "CACHE_ERROR");
        assert_eq!(VeloraError::Database("db".to_string()).error_code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_retriable_errors() {
        assert!(VeloraError::Database("connection lost".to_string()).is_retriable());
        assert!(VeloraError::cache("timeout").is_retriable());
        assert!(!VeloraError::not_found("Product", 1).is_retriable());
        assert!(!VeloraError::validation("bad input").is_retriable());
    }

    #[test]
    fn test_error_constructors() {
        let not_found = VeloraError::not_found("Order", "123");
        assert!(not_found.to_string().contains("Order"));

        let validation = VeloraError::validation("price must be positive");
        assert!(validation.to_string().contains("price must be positive"));

        let conflict = VeloraError::conflict("SKU already exists");
        assert!(conflict.to_string().contains("SKU already exists"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let velora: VeloraError = err.into();
        assert_eq!(velora.error_code(), "INTERNAL_ERROR");
    }
}
