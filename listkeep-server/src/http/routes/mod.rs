//! Route handlers organized by resource

pub mod health;
pub mod items;

use super::error::ApiError;

/// Fallback for paths no route matches
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for known paths hit with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
