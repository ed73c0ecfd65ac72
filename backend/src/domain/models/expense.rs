use crate::domain::validation::ValidationErrors;

/// A stored expense record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: i64,
    pub title: String,
}

/// Validated input for creating an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub title: String,
}

/// Validated input for updating an expense; `None` leaves the field as is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseChanges {
    pub title: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    #[error("Expense not found: {0}")]
    NotFound(i64),
    #[error("No input data provided")]
    NoInputData,
    #[error("Invalid expense payload: {0}")]
    Validation(ValidationErrors),
    #[error("Storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}
