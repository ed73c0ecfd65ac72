use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde_json::Value;

use crate::domain::validation::parse_payload;
use crate::io::rest::error::ApiError;

/// Expense id taken from the `:id` path segment.
///
/// Only plain digit strings that fit an `i64` are accepted; anything else is
/// answered with the same 404 as an unknown route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ExpenseId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        parse_expense_id(&raw).map(ExpenseId).ok_or(ApiError::NotFound)
    }
}

fn parse_expense_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Request body decoded as JSON, `None` when no usable input was sent
#[derive(Debug, Clone)]
pub struct JsonPayload(pub Option<Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // An unreadable body counts as no input
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::NoInputData)?;

        Ok(JsonPayload(parse_payload(&body)))
    }
}
