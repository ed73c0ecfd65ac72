use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::expense::{CreateExpenseCommand, UpdateExpenseCommand};
use crate::domain::models::expense::{Expense, ExpenseError};
use crate::domain::validation::{validate_expense_changes, validate_new_expense};
use crate::storage::traits::ExpenseStorage;

/// Service for managing expenses
#[derive(Clone)]
pub struct ExpenseService {
    storage: Arc<dyn ExpenseStorage>,
}

impl ExpenseService {
    /// Create a new ExpenseService
    pub fn new(storage: Arc<dyn ExpenseStorage>) -> Self {
        Self { storage }
    }

    /// List all expenses
    pub async fn list_expenses(&self) -> Result<Vec<Expense>, ExpenseError> {
        let expenses = self.storage.list_expenses().await?;
        info!("Found {} expenses", expenses.len());
        Ok(expenses)
    }

    /// Get an expense by ID
    pub async fn get_expense(&self, id: i64) -> Result<Expense, ExpenseError> {
        match self.storage.get_expense(id).await? {
            Some(expense) => Ok(expense),
            None => {
                warn!("Expense not found: {}", id);
                Err(ExpenseError::NotFound(id))
            }
        }
    }

    /// Create a new expense
    pub async fn create_expense(&self, command: CreateExpenseCommand) -> Result<Expense, ExpenseError> {
        let payload = command.payload.ok_or(ExpenseError::NoInputData)?;
        let new_expense = validate_new_expense(&payload).map_err(ExpenseError::Validation)?;

        let expense = self.storage.create_expense(&new_expense.title).await?;
        info!("Created expense {} with title {:?}", expense.id, expense.title);

        Ok(expense)
    }

    /// Update an existing expense
    ///
    /// Existence is checked before the payload, so an unknown id is reported
    /// as not found even when the body is also invalid.
    pub async fn update_expense(&self, command: UpdateExpenseCommand) -> Result<Expense, ExpenseError> {
        let current = self.get_expense(command.id).await?;

        let payload = command.payload.ok_or(ExpenseError::NoInputData)?;
        let changes = validate_expense_changes(&payload).map_err(ExpenseError::Validation)?;

        // The row can disappear between the lookup and the write
        let expense = self
            .storage
            .update_expense(current.id, changes.title.as_deref())
            .await?
            .ok_or(ExpenseError::NotFound(current.id))?;
        info!("Updated expense {} with title {:?}", expense.id, expense.title);

        Ok(expense)
    }

    /// Delete an expense
    pub async fn delete_expense(&self, id: i64) -> Result<(), ExpenseError> {
        if !self.storage.delete_expense(id).await? {
            warn!("Expense not found for delete: {}", id);
            return Err(ExpenseError::NotFound(id));
        }

        info!("Deleted expense {}", id);
        Ok(())
    }
}
