use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use shared::MessageResponse;
use tracing::{info, warn};

use crate::io::rest::error::ApiError;
use crate::AppState;

/// Create the router for endpoints that are not tied to a resource
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Send a simple message, like a greeting.
#[utoipa::path(
    get,
    path = "/",
    tag = "echo endpoint",
    responses(
        (status = 200, description = "OK", body = MessageResponse,
            example = json!({"message": "Hello World!"}))
    )
)]
pub async fn index() -> (StatusCode, Json<MessageResponse>) {
    info!("GET /");
    (StatusCode::OK, Json(MessageResponse::new("Hello World!")))
}

/// Fallback for every unknown route
pub async fn not_found(uri: axum::http::Uri) -> ApiError {
    warn!("No route for {}", uri);
    ApiError::NotFound
}

/// Replace the router's empty 405 body with the JSON error envelope,
/// keeping the `Allow` header
pub async fn method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut response = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        response.headers_mut().insert(header::ALLOW, allow);
    }
    response
}
