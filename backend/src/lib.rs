//! # Expense Tracker Backend
//!
//! HTTP service for managing expense records.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers, documentation)
//!     ↓
//! Domain Layer (validation, ExpenseService)
//!     ↓
//! Storage Layer (ExpenseStorage trait, SQLite repository)
//! ```
//!
//! Everything is built once by [`initialize_backend`] and handed to the
//! handlers through [`AppState`]; there is no global state.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{http::Method, middleware, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::ExpenseService;
use crate::io::rest::{common_apis, docs_apis, expense_apis};
use crate::storage::{DbConnection, ExpenseRepository};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url, config.database_max_connections).await?;

    info!("Setting up domain model");
    let expense_repository = ExpenseRepository::new(db);
    let expense_service = ExpenseService::new(Arc::new(expense_repository));

    Ok(AppState { expense_service })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .merge(common_apis::router())
        .merge(expense_apis::router())
        .merge(docs_apis::router())
        .fallback(common_apis::not_found)
        .layer(middleware::map_response(common_apis::method_not_allowed))
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = &config.cors_allow_origin {
        let cors = CorsLayer::new()
            .allow_origin(origin.clone())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any);
        router = router.layer(cors);
    }

    router.with_state(app_state)
}
