use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Request body for creating or updating an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"title": "My Expense"}))]
pub struct ExpenseIn {
    /// Short description of the expense (at least one character)
    #[schema(min_length = 1)]
    pub title: String,
}

/// An expense as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"id": 2, "title": "My Expense"}))]
pub struct ExpenseOut {
    /// Server-assigned identifier, never accepted as input
    #[schema(read_only)]
    pub id: i64,
    pub title: String,
}

/// Generic `{"message": ...}` body used by the greeting endpoint and
/// the missing-input error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error envelope for not-found and internal errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"error": "404 Not Found: The requested URL was not found on the server."}))]
pub struct ErrorResponse {
    pub error: String,
}

/// Validation failure body: field name mapped to its violation messages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(example = json!({"title": ["Shorter than minimum length 1."]}))]
pub struct ValidationErrorResponse(pub BTreeMap<String, Vec<String>>);
