//! # Storage Traits
//!
//! Storage abstraction used by the domain layer, so the expense service does
//! not depend on a concrete database.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::expense::Expense;

/// Trait defining the interface for expense storage operations
///
/// Lookups that miss return `Ok(None)` / `Ok(false)`; `Err` is reserved for
/// storage failures.
#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// List every stored expense ordered by id
    async fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// Retrieve a specific expense by ID
    async fn get_expense(&self, id: i64) -> Result<Option<Expense>>;

    /// Store a new expense and return it with its assigned ID
    async fn create_expense(&self, title: &str) -> Result<Expense>;

    /// Replace the title when one is given; returns the stored record
    async fn update_expense(&self, id: i64, title: Option<&str>) -> Result<Option<Expense>>;

    /// Delete an expense
    /// Returns true if the expense was found and deleted, false otherwise
    async fn delete_expense(&self, id: i64) -> Result<bool>;
}
