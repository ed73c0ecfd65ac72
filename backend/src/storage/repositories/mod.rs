// Repository modules
pub mod expense_repository;

// Re-export repository types
pub use expense_repository::ExpenseRepository;
