//! # REST API for Expense Management
//!
//! Collection and item endpoints for expenses. Trailing slashes are part of
//! the routes; `/expenses` and `/expenses/{id}` redirect to the slashed form.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect},
    routing::{any, get},
    Json, Router,
};
use shared::{ErrorResponse, ExpenseIn, ExpenseOut, ValidationErrorResponse};
use tracing::info;

use crate::domain::commands::expense::{CreateExpenseCommand, UpdateExpenseCommand};
use crate::io::rest::error::ApiError;
use crate::io::rest::extractors::{ExpenseId, JsonPayload};
use crate::io::rest::mappers::expense_mapper::ExpenseMapper;
use crate::AppState;

pub const COLLECTION_PATH: &str = "/expenses/";

/// Create a router for expense related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/expenses", any(redirect_to_collection))
        .route(COLLECTION_PATH, get(list_expenses).post(create_expense))
        .route("/expenses/:id", any(redirect_to_item))
        .route(
            "/expenses/:id/",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

async fn redirect_to_collection(uri: Uri) -> Redirect {
    Redirect::permanent(&with_slash(COLLECTION_PATH.trim_end_matches('/'), &uri))
}

/// Only well-formed ids are redirected; anything else is a 404
async fn redirect_to_item(ExpenseId(_): ExpenseId, uri: Uri) -> Redirect {
    Redirect::permanent(&with_slash(uri.path(), &uri))
}

fn with_slash(path: &str, uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("{}/?{}", path, query),
        None => format!("{}/", path),
    }
}

/// Return a list of all expenses.
#[utoipa::path(
    get,
    path = "/expenses/",
    tag = "expenses",
    responses(
        (status = 200, description = "OK", body = [ExpenseOut])
    )
)]
pub async fn list_expenses(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpenseOut>>, ApiError> {
    info!("GET /expenses/");

    let expenses = state.expense_service.list_expenses().await?;
    Ok(Json(ExpenseMapper::to_dto_list(expenses)))
}

/// Return a specific expense.
#[utoipa::path(
    get,
    path = "/expenses/{id}/",
    tag = "expenses",
    params(("id" = i64, Path, description = "ID of the expense")),
    responses(
        (status = 200, description = "OK", body = ExpenseOut),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_expense(
    State(state): State<AppState>,
    ExpenseId(id): ExpenseId,
) -> Result<Json<ExpenseOut>, ApiError> {
    info!("GET /expenses/{}/", id);

    let expense = state.expense_service.get_expense(id).await?;
    Ok(Json(ExpenseMapper::to_dto(expense)))
}

/// Create a new expense.
#[utoipa::path(
    post,
    path = "/expenses/",
    tag = "expenses",
    request_body = ExpenseIn,
    responses(
        (status = 201, description = "Created.", body = ExpenseOut),
        (status = 400, description = "Missing or invalid input.", body = ValidationErrorResponse)
    )
)]
pub async fn create_expense(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /expenses/ - payload: {:?}", payload);

    let command = CreateExpenseCommand { payload };
    let expense = state.expense_service.create_expense(command).await?;

    Ok((StatusCode::CREATED, Json(ExpenseMapper::to_dto(expense))))
}

/// Update an existing expense.
///
/// Answers 201 rather than 200; existing clients depend on that status.
#[utoipa::path(
    put,
    path = "/expenses/{id}/",
    tag = "expenses",
    params(("id" = i64, Path, description = "The ID of the expense to update")),
    request_body = ExpenseIn,
    responses(
        (status = 201, description = "Created.", body = ExpenseOut),
        (status = 400, description = "Missing or invalid input.", body = ValidationErrorResponse),
        (status = 404, description = "Not found.", body = ErrorResponse)
    )
)]
pub async fn update_expense(
    State(state): State<AppState>,
    ExpenseId(id): ExpenseId,
    JsonPayload(payload): JsonPayload,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /expenses/{}/ - payload: {:?}", id, payload);

    let command = UpdateExpenseCommand { id, payload };
    let expense = state.expense_service.update_expense(command).await?;

    Ok((StatusCode::CREATED, Json(ExpenseMapper::to_dto(expense))))
}

/// Delete an existing expense.
#[utoipa::path(
    delete,
    path = "/expenses/{id}/",
    tag = "expenses",
    params(("id" = i64, Path, description = "The ID of the expense to delete.")),
    responses(
        (status = 204, description = "No content."),
        (status = 404, description = "Not found.", body = ErrorResponse)
    )
)]
pub async fn delete_expense(
    State(state): State<AppState>,
    ExpenseId(id): ExpenseId,
) -> Result<StatusCode, ApiError> {
    info!("DELETE /expenses/{}/", id);

    state.expense_service.delete_expense(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::ExpenseService;
    use crate::io::rest::error::{METHOD_NOT_ALLOWED_MESSAGE, NOT_FOUND_MESSAGE, NO_INPUT_MESSAGE};
    use crate::storage::{DbConnection, ExpenseRepository};
    use axum::{
        body::Body,
        http::{header, Method, Request},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::util::ServiceExt; // for `oneshot`

    async fn setup_test_app() -> Router {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let app_state = AppState {
            expense_service: ExpenseService::new(Arc::new(ExpenseRepository::new(db))),
        };

        crate::create_router(app_state, &AppConfig::default())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn create(app: &Router, title: &str) -> ExpenseOut {
        let response = send(app, Method::POST, "/expenses/", Some(json!({"title": title}))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        serde_json::from_value(body_json(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_round_trip() {
        let app = setup_test_app().await;

        let response = send(&app, Method::POST, "/expenses/", Some(json!({"title": "Coffee"}))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await, json!({"id": 1, "title": "Coffee"}));

        let response = send(&app, Method::GET, "/expenses/1/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"id": 1, "title": "Coffee"}));

        let response = send(&app, Method::DELETE, "/expenses/1/", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());

        let response = send(&app, Method::GET, "/expenses/1/", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": NOT_FOUND_MESSAGE}));
    }

    #[tokio::test]
    async fn test_list_expenses() {
        let app = setup_test_app().await;

        let response = send(&app, Method::GET, "/expenses/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));

        create(&app, "Rent").await;
        create(&app, "Groceries").await;

        let response = send(&app, Method::GET, "/expenses/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!([{"id": 1, "title": "Rent"}, {"id": 2, "title": "Groceries"}])
        );
    }

    #[tokio::test]
    async fn test_created_ids_strictly_increase() {
        let app = setup_test_app().await;

        let first = create(&app, "a").await;
        let second = create(&app, "b").await;
        assert!(second.id > first.id);

        send(&app, Method::DELETE, &format!("/expenses/{}/", second.id), None).await;
        let third = create(&app, "c").await;
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn test_create_with_leading_nul_title() {
        let app = setup_test_app().await;

        let response = send(&app, Method::POST, "/expenses/", Some(json!({"title": "\u{0}x"}))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await, json!({"id": 1, "title": "\u{0}x"}));
    }

    #[tokio::test]
    async fn test_create_with_empty_title() {
        let app = setup_test_app().await;

        let response = send(&app, Method::POST, "/expenses/", Some(json!({"title": ""}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"title": ["Shorter than minimum length 1."]})
        );
    }

    #[tokio::test]
    async fn test_create_reports_every_violation() {
        let app = setup_test_app().await;

        let response = send(&app, Method::POST, "/expenses/", Some(json!({"id": 9, "amount": 3}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "amount": ["Unknown field."],
                "id": ["Unknown field."],
                "title": ["Missing data for required field."]
            })
        );
    }

    #[tokio::test]
    async fn test_create_without_input() {
        let app = setup_test_app().await;

        let response = send(&app, Method::POST, "/expenses/", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"message": NO_INPUT_MESSAGE}));

        let response = send(&app, Method::POST, "/expenses/", Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"message": NO_INPUT_MESSAGE}));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/expenses/")
            .header("content-type", "application/json")
            .body(Body::from("invalid json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"message": NO_INPUT_MESSAGE}));
    }

    #[tokio::test]
    async fn test_update_expense() {
        let app = setup_test_app().await;
        let created = create(&app, "Lunch").await;
        let uri = format!("/expenses/{}/", created.id);

        let response = send(&app, Method::PUT, &uri, Some(json!({"title": "Dinner"}))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await, json!({"id": created.id, "title": "Dinner"}));

        let response = send(&app, Method::GET, &uri, None).await;
        assert_eq!(body_json(response).await, json!({"id": created.id, "title": "Dinner"}));
    }

    #[tokio::test]
    async fn test_update_with_empty_body_leaves_record() {
        let app = setup_test_app().await;
        let created = create(&app, "Lunch").await;
        let uri = format!("/expenses/{}/", created.id);

        let response = send(&app, Method::PUT, &uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"message": NO_INPUT_MESSAGE}));

        let response = send(&app, Method::PUT, &uri, Some(json!({"title": ""}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, Method::GET, &uri, None).await;
        assert_eq!(body_json(response).await, json!({"id": created.id, "title": "Lunch"}));
    }

    #[tokio::test]
    async fn test_update_nonexistent_expense() {
        let app = setup_test_app().await;

        let response = send(&app, Method::PUT, "/expenses/5/", Some(json!({"title": "x"}))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": NOT_FOUND_MESSAGE}));

        // Missing id wins over missing body
        let response = send(&app, Method::PUT, "/expenses/5/", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let app = setup_test_app().await;
        let created = create(&app, "Taxi").await;
        let uri = format!("/expenses/{}/", created.id);

        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": NOT_FOUND_MESSAGE}));
    }

    #[tokio::test]
    async fn test_non_numeric_ids_are_not_routed() {
        let app = setup_test_app().await;
        create(&app, "Coffee").await;

        for uri in ["/expenses/abc/", "/expenses/-1/", "/expenses/1.0/", "/expenses/99999999999999999999/"] {
            let response = send(&app, Method::GET, uri, None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {}", uri);
            assert_eq!(body_json(response).await, json!({"error": NOT_FOUND_MESSAGE}));
        }
    }

    #[tokio::test]
    async fn test_missing_trailing_slash() {
        let app = setup_test_app().await;

        let response = send(&app, Method::GET, "/expenses", None).await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/expenses/");

        let response = send(&app, Method::GET, "/expenses?page=2", None).await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/expenses/?page=2");

        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let response = send(&app, method, "/expenses/1", None).await;
            assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
            assert_eq!(response.headers()[header::LOCATION], "/expenses/1/");
        }

        let response = send(&app, Method::GET, "/expenses/abc", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": NOT_FOUND_MESSAGE}));
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let app = setup_test_app().await;

        for uri in ["/expenses/", "/expenses/1/"] {
            let response = send(&app, Method::PATCH, uri, None).await;
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                "application/json"
            );
            assert_eq!(body_json(response).await, json!({"error": METHOD_NOT_ALLOWED_MESSAGE}));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_ids() {
        const CREATES: usize = 20;

        let path = std::env::temp_dir()
            .join(format!("expense-tracker-concurrent-{}.db", std::process::id()));
        let remove_db_files = || {
            for suffix in ["", "-wal", "-shm"] {
                let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
            }
        };
        remove_db_files();

        let config = AppConfig {
            database_url: format!("sqlite:{}", path.display()),
            database_max_connections: 4,
            ..AppConfig::default()
        };
        let app_state = crate::initialize_backend(&config)
            .await
            .expect("Failed to open file database");
        let app = crate::create_router(app_state, &config);

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..CREATES {
            let app = app.clone();
            tasks.spawn(async move { create(&app, &format!("Expense {}", i)).await.id });
        }

        let mut ids = Vec::with_capacity(CREATES);
        while let Some(id) = tasks.join_next().await {
            ids.push(id.expect("create task panicked"));
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CREATES);

        drop(app);
        remove_db_files();
    }
}
