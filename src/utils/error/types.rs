//! Error types for the permission engine

use thiserror::Error;

/// Result type alias for the permission engine
pub type Result<T> = std::result::Result<T, RbacError>;

/// Main error type for the permission engine
#[derive(Error, Debug)]
pub enum RbacError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Permission schema errors, raised at load time only
    #[error("Schema error: {0}")]
    Schema(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authorization errors
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
