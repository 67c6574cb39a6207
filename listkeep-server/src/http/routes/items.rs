//! Item endpoints
//!
//! GET    /api/items       list all items
//! POST   /api/items       create from `{"text": ...}`
//! DELETE /api/items/{id}  delete by id, reporting rows removed

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    routing::{delete, get},
    Json, Router,
};
use tracing::debug;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{CreateItemRequest, DeleteResponse, Item};

/// GET /api/items
async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store()?.list().await?;
    Ok(Json(items))
}

/// POST /api/items
async fn create_item(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Item>, ApiError> {
    let store = state.store()?;
    let body = body?;
    let text = parse_create_request(&body)?.validated_text()?;

    let id = store.insert(&text).await?;
    debug!(id, "item created");

    Ok(Json(Item {
        id,
        text: Some(text.into_inner()),
    }))
}

/// DELETE /api/items/{id}
async fn delete_item(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let store = state.store()?;
    let Path(raw_id) = raw_id?;

    let Some(id) = parse_item_id(&raw_id) else {
        debug!(id = %raw_id, "non-numeric id matches no item");
        return Ok(Json(DeleteResponse { deleted: 0 }));
    };

    let deleted = store.delete_by_id(id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

/// Read a path id the way an INTEGER key column compares it: integers,
/// plus reals with no fractional part (`1.0`, `1e2`). Anything else
/// matches no row.
fn parse_item_id(raw: &str) -> Option<i64> {
    if let Ok(id) = raw.parse::<i64>() {
        return Some(id);
    }

    let value = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

/// An empty body counts as a body without `text`; the Content-Type header
/// is not consulted.
fn parse_create_request(body: &[u8]) -> Result<CreateItemRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateItemRequest::default());
    }
    Ok(serde_json::from_slice(body)?)
}

/// Item routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/{id}", delete(delete_item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;

    #[test]
    fn blank_body_means_missing_text() {
        let req = parse_create_request(b"  \n").unwrap();
        assert_eq!(req.validated_text(), Err(ValidationError::TextRequired));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = parse_create_request(b"{text:").unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }

    #[test]
    fn integral_reals_address_integer_ids() {
        assert_eq!(parse_item_id("7"), Some(7));
        assert_eq!(parse_item_id("-3"), Some(-3));
        assert_eq!(parse_item_id("1.0"), Some(1));
        assert_eq!(parse_item_id("2e1"), Some(20));
        assert_eq!(parse_item_id("1.5"), None);
        assert_eq!(parse_item_id("abc"), None);
        assert_eq!(parse_item_id("NaN"), None);
        assert_eq!(parse_item_id("inf"), None);
        assert_eq!(parse_item_id("1e300"), None);
    }
}
