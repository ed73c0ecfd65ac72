//! # API documentation
//!
//! Serves the generated OpenAPI document at `/spec/` and a Swagger UI page
//! that renders it at `/swagger`.

use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use shared::{ErrorResponse, ExpenseIn, ExpenseOut, MessageResponse, ValidationErrorResponse};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

use crate::io::rest::{common_apis, expense_apis};
use crate::AppState;

pub const SPEC_PATH: &str = "/spec/";
pub const SWAGGER_UI_PATH: &str = "/swagger";

#[derive(OpenApi)]
#[openapi(
    info(title = "My API", version = "1.0"),
    paths(
        common_apis::index,
        expense_apis::list_expenses,
        expense_apis::get_expense,
        expense_apis::create_expense,
        expense_apis::update_expense,
        expense_apis::delete_expense,
    ),
    components(schemas(
        ExpenseIn,
        ExpenseOut,
        MessageResponse,
        ErrorResponse,
        ValidationErrorResponse
    )),
    tags(
        (name = "expenses", description = "Manage expense records"),
        (name = "echo endpoint", description = "Connectivity check")
    )
)]
pub struct ApiDoc;

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Swagger UI</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({
        url: "/spec/",
        dom_id: "#swagger-ui",
      });
    };
  </script>
</body>
</html>
"##;

/// Create the router for the documentation endpoints
pub fn router() -> Router<AppState> {
    // Build once, serve as static JSON
    let openapi_doc = Arc::new(ApiDoc::openapi());

    Router::new()
        .route(
            SPEC_PATH,
            get(move || {
                let doc = openapi_doc.clone();
                async move {
                    info!("GET {}", SPEC_PATH);
                    ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref())).into_response()
                }
            }),
        )
        .route(SWAGGER_UI_PATH, get(swagger_ui))
        .route("/swagger/", get(swagger_ui))
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}
