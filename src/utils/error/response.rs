//! HTTP response handling for errors

use super::types::ServiceError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::{debug, error};

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_client_error() {
            debug!("Request rejected: {}", self);
        } else {
            error!("Request failed: {}", self);
        }

        let (error_code, message) = match self {
            ServiceError::Config(_) => ("CONFIG_ERROR", self.to_string()),
            ServiceError::Database(_) => {
                ("DATABASE_ERROR", "Database operation failed".to_string())
            }
            ServiceError::Storage(_) => ("STORAGE_ERROR", "Storage operation failed".to_string()),
            ServiceError::Validation(_) => ("VALIDATION_ERROR", self.to_string()),
            ServiceError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            ServiceError::BadRequest(_) => ("BAD_REQUEST", self.to_string()),
            ServiceError::Batch(_) => ("BATCH_ERROR", self.to_string()),
            ServiceError::Unavailable(_) => ("SERVICE_UNAVAILABLE", self.to_string()),
            _ => ("INTERNAL_ERROR", "An internal error occurred".to_string()),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
