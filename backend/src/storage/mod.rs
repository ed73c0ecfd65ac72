//! # Storage Module
//!
//! Handles persistence of expense records.
//!
//! The domain layer only sees the [`ExpenseStorage`] trait; the SQLite
//! repository is wired in at startup.
//!
//! ## Components
//!
//! - **connection.rs** - SQLite pool creation and schema setup
//! - **traits.rs** - storage abstraction used by the domain
//! - **repositories/** - SQLite-based repository implementations

pub mod connection;
pub mod repositories;
pub mod traits;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::ExpenseRepository;
pub use traits::ExpenseStorage;
