//! Domain-level command types
//! The REST layer builds these from the incoming request; the payload is
//! still unvalidated at this point and is checked by the service.

pub mod expense {
    use serde_json::Value;

    /// Input for creating a new expense.
    #[derive(Debug, Clone)]
    pub struct CreateExpenseCommand {
        /// Decoded request body, `None` when no input was provided
        pub payload: Option<Value>,
    }

    /// Input for updating an existing expense.
    #[derive(Debug, Clone)]
    pub struct UpdateExpenseCommand {
        pub id: i64,
        pub payload: Option<Value>,
    }
}
