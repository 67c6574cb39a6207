//! Wire and storage types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A persisted list item.
///
/// `text` is nullable at the schema level; rows written by other tools
/// may carry NULL and are rendered as `"text": null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub text: Option<String>,
}

/// Body of `POST /api/items`
///
/// `text` is kept as raw JSON so falsy values (`null`, `false`, `0`, `""`)
/// all report "Text is required" rather than a type error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateItemRequest {
    pub text: Option<Value>,
}

impl CreateItemRequest {
    pub fn validated_text(self) -> Result<ItemText, ValidationError> {
        match self.text {
            None | Some(Value::Null) | Some(Value::Bool(false)) => {
                Err(ValidationError::TextRequired)
            }
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(ValidationError::TextRequired),
            Some(Value::String(text)) => ItemText::new(text),
            Some(_) => Err(ValidationError::TextNotString),
        }
    }
}

/// Item text that has passed creation-time validation (non-empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemText(String);

impl ItemText {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ValidationError::TextRequired);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Response of `DELETE /api/items/{id}`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    /// Rows actually removed (0 or 1)
    pub deleted: u64,
}

/// Response of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Every failure body has this shape
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Validation error for incoming items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `text` missing, null, false, zero, or empty
    TextRequired,

    /// `text` present and truthy but not a string
    TextNotString,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextRequired => write!(f, "Text is required"),
            Self::TextNotString => write!(f, "Text must be a string"),
        }
    }
}

impl std::error::Error for ValidationError {}
