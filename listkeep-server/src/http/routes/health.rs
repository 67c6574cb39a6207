//! Health check endpoint

use axum::{routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};

use crate::models::HealthResponse;

/// GET /health - never touches the store
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn timestamp_is_utc_iso8601() {
        let Json(body) = health().await;
        assert!(body.timestamp.ends_with('Z'));
        DateTime::parse_from_rfc3339(&body.timestamp).unwrap();
    }
}
