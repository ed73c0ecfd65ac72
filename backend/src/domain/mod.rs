//! # Domain Module
//!
//! Business rules for expenses, independent of HTTP and of the storage
//! backend.
//!
//! ## Module Organization
//!
//! - **models**: the `Expense` entity, validated inputs and `ExpenseError`
//! - **validation**: payload checks applied before storage is touched
//! - **commands**: inputs handed over by the REST layer
//! - **expense_service**: CRUD operations composing validation and storage
//!
//! ## Business Rules
//!
//! - Ids are assigned by storage and never accepted from clients
//! - Titles must be strings of at least one character
//! - An update only replaces the title when a new one is supplied

pub mod commands;
pub mod expense_service;
pub mod models;
pub mod validation;

pub use commands::*;
pub use expense_service::*;
