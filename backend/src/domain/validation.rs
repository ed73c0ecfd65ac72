//! # Expense payload validation
//!
//! Checks a decoded request body before anything reaches storage. The only
//! accepted field is `title`, a string of at least one character; every
//! violation is collected so clients see all problems at once.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::models::expense::{ExpenseChanges, NewExpense};

pub const TITLE_FIELD: &str = "title";
/// Key used for errors about the payload as a whole
pub const SCHEMA_FIELD: &str = "_schema";

const MIN_TITLE_LENGTH: usize = 1;

pub const MISSING_FIELD: &str = "Missing data for required field.";
pub const NULL_FIELD: &str = "Field may not be null.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const TOO_SHORT: &str = "Shorter than minimum length 1.";
pub const UNKNOWN_FIELD: &str = "Unknown field.";
pub const INVALID_INPUT_TYPE: &str = "Invalid input type.";

/// Field name mapped to the violations found for that field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn messages(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn into_fields(self) -> BTreeMap<String, Vec<String>> {
        self.fields
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Decode a raw request body.
///
/// Returns `None` when there is no usable input: an empty body, a body that
/// is not JSON, or a JSON value that carries nothing (`null`, `false`, `0`,
/// `""`, `[]`, `{}`).
pub fn parse_payload(body: &[u8]) -> Option<Value> {
    let value: Value = serde_json::from_slice(body).ok()?;
    (!is_blank(&value)).then_some(value)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Validate a payload for creating an expense; `title` is required
pub fn validate_new_expense(payload: &Value) -> Result<NewExpense, ValidationErrors> {
    match validate_fields(payload, true)? {
        Some(title) => Ok(NewExpense { title }),
        None => Err(ValidationErrors::single(TITLE_FIELD, MISSING_FIELD)),
    }
}

/// Validate a payload for updating an expense; `title` may be omitted
pub fn validate_expense_changes(payload: &Value) -> Result<ExpenseChanges, ValidationErrors> {
    let title = validate_fields(payload, false)?;
    Ok(ExpenseChanges { title })
}

fn validate_fields(payload: &Value, require_title: bool) -> Result<Option<String>, ValidationErrors> {
    let Some(fields) = payload.as_object() else {
        return Err(ValidationErrors::single(SCHEMA_FIELD, INVALID_INPUT_TYPE));
    };

    let mut errors = ValidationErrors::default();

    // `id` lands here too: it is assigned by storage, never accepted
    for key in fields.keys().filter(|key| key.as_str() != TITLE_FIELD) {
        errors.add(key, UNKNOWN_FIELD);
    }

    let title = match fields.get(TITLE_FIELD) {
        None => {
            if require_title {
                errors.add(TITLE_FIELD, MISSING_FIELD);
            }
            None
        }
        Some(Value::Null) => {
            errors.add(TITLE_FIELD, NULL_FIELD);
            None
        }
        Some(Value::String(title)) if title.chars().count() < MIN_TITLE_LENGTH => {
            errors.add(TITLE_FIELD, TOO_SHORT);
            None
        }
        Some(Value::String(title)) => Some(title.clone()),
        Some(_) => {
            errors.add(TITLE_FIELD, NOT_A_STRING);
            None
        }
    };

    if errors.is_empty() {
        Ok(title)
    } else {
        Err(errors)
    }
}
