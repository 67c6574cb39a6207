//! API error type with IntoResponse
//!
//! Every error renders as `{"error": <message>}` with a matching status.

use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::StoreError;
use crate::models::{ErrorBody, ValidationError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Input failed validation (400)
    Validation(ValidationError),

    /// Body is not valid JSON for the endpoint (400)
    MalformedBody(String),

    /// Store failed to open at startup (500)
    StoreUnavailable,

    /// A store call failed (500, logged)
    Store(StoreError),

    /// No route matches the path (404)
    NotFound,

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// An axum extractor refused the request (oversized body, bad path);
    /// keeps the extractor's status and message
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Rejected { status, .. } => *status,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::MalformedBody(reason) => format!("Invalid JSON body: {}", reason),
            Self::StoreUnavailable => "Database not available".to_string(),
            Self::Store(e) => e.to_string(),
            Self::NotFound => "Not found".to_string(),
            Self::MethodNotAllowed => "Method not allowed".to_string(),
            Self::Rejected { message, .. } => message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Store(e) => tracing::error!("Database error: {}", e),
            Self::StoreUnavailable => tracing::error!("Request rejected: database not available"),
            _ => {}
        }

        let body = Json(ErrorBody {
            error: self.message(),
        });

        (self.status(), body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedBody(e.to_string())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
