//! HTTP response handling for errors

use super::types::ClubhouseError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

impl ResponseError for ClubhouseError {
    fn status_code(&self) -> StatusCode {
        match self {
            ClubhouseError::Validation(_) | ClubhouseError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ClubhouseError::NotFound(_) => StatusCode::NOT_FOUND,
            ClubhouseError::PermissionDenied(_) | ClubhouseError::AuthenticationRequired => {
                StatusCode::FORBIDDEN
            }
            ClubhouseError::Config(_)
            | ClubhouseError::Database(_)
            | ClubhouseError::Serialization(_)
            | ClubhouseError::Yaml(_)
            | ClubhouseError::Io(_)
            | ClubhouseError::Jwt(_)
            | ClubhouseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        let message = match self {
            ClubhouseError::Database(e) => {
                error!(error = %e, "Database error while handling request");
                "Database operation failed".to_string()
            }
            ClubhouseError::Config(_)
            | ClubhouseError::Serialization(_)
            | ClubhouseError::Yaml(_)
            | ClubhouseError::Io(_)
            | ClubhouseError::Jwt(_)
            | ClubhouseError::Internal(_) => {
                error!(error = %self, "Internal error while handling request");
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(status_code).json(ErrorResponse::new(message))
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    /// Always `"error"`
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
