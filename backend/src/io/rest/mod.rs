//! # REST API Interface Layer
//!
//! HTTP endpoints for the expense service. This layer handles:
//! - request extraction (path ids, JSON bodies)
//! - translation of domain errors into HTTP responses
//! - mapping domain models to the DTOs in the `shared` crate
//! - the generated API documentation
//!
//! It holds no business rules; everything is delegated to `ExpenseService`.

pub mod common_apis;
pub mod docs_apis;
pub mod error;
pub mod expense_apis;
pub mod extractors;
pub mod mappers;

pub use error::ApiError;
