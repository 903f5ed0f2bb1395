//! Error types for the item service

use thiserror::Error;

/// Result type alias for the item service
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Main error type for the item service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Storage backend errors that are not database specific
    #[error("Storage error: {0}")]
    Storage(String),

    /// Batch processing could not start or make progress
    #[error("Batch error: {0}")]
    Batch(String),

    /// Operation rejected because the service is shutting down
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
