//! Core error type definitions

use thiserror::Error;

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, ClubhouseError>;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum ClubhouseError {
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

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Bad input to a role store mutation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown role or user
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller lacks a declared permission
    #[error("Missing permission: {0}")]
    PermissionDenied(String),

    /// Protected operation reached without an authenticated caller
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
