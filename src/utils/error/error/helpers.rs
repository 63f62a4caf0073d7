//! Helper functions for creating specific error types

use super::types::ClubhouseError;

impl ClubhouseError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn permission_denied<S: Into<String>>(permission: S) -> Self {
        Self::PermissionDenied(permission.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error is an access-control failure (403 at the transport level)
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_) | Self::AuthenticationRequired
        )
    }

    /// Stable reason code used in logs
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::Database(_) => "database_error",
            Self::Serialization(_) => "serialization_error",
            Self::Yaml(_) => "yaml_error",
            Self::Io(_) => "io_error",
            Self::Jwt(_) => "jwt_error",
            Self::Validation(_) => "validation_error",
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::PermissionDenied(_) => "missing_permission",
            Self::AuthenticationRequired => "authentication_required",
            Self::Internal(_) => "internal_error",
        }
    }
}
