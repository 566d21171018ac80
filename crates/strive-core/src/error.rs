use thiserror::Error;

/// Application-wide error types for Strive.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// The record does not exist, or is not visible to the caller.
    #[error("{0}")]
    NotFound(String),

    /// The caller can see the record but may not modify it.
    #[error("{0}")]
    Forbidden(String),

    /// Missing, invalid, or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// A uniqueness constraint would be violated.
    #[error("{0}")]
    Conflict(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{what} not found."))
    }

    /// Returns true if the error is caused by the client rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::NotFound(_)
                | AppError::Forbidden(_)
                | AppError::Unauthorized(_)
                | AppError::Conflict(_)
                | AppError::SerializationError(_)
        )
    }
}
