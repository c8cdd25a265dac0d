//! Request validation.
//!
//! The generator only validates the presence of the four top-level objects.
//! Field-level content is trusted: missing text renders as a dash and the
//! caller-supplied total is never recomputed.

use std::fmt;

/// A single validation failure.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_object(field: &str) -> Self {
        Self::new(field, format!("'{field}' object is required"))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with a combined message.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Collapse into a single human-readable message, keeping the original
    /// platform's error text as the prefix.
    pub fn into_result(self) -> Result<(), String> {
        if self.errors.is_empty() {
            return Ok(());
        }

        let fields = self
            .errors
            .iter()
            .map(|e| e.field.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Err(format!("Missing required contract details: {fields}"))
    }
}

/// Record an error if a required object is absent.
pub fn validate_present<T>(value: &Option<T>, field: &str, errors: &mut ValidationErrors) {
    if value.is_none() {
        errors.push(ValidationError::missing_object(field));
    }
}
