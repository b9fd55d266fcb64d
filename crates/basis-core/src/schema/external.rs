use serde_json::Value;

use super::{Schema, Validation};
use crate::errors::{Defect, ValidationError, GENERIC_REJECTION};

/// Error type an external validator may signal
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Name given to an external schema that does not name itself
pub const UNNAMED_EXTERNAL: &str = "external";

/// A pass/fail validator supplied by another library
///
/// Acceptance returns nothing useful; rejection is an error whose message
/// explains the problem. Any closure `Fn(&Value) -> Result<(), E>` where `E`
/// converts into [`BoxError`] (including `String` and `&str`) qualifies.
pub trait ExternalValidator {
    /// Optional self-reported name
    fn name(&self) -> Option<&str> {
        None
    }

    /// Check a value, signalling rejection through the error
    fn check(&self, value: &Value) -> Result<(), BoxError>;
}

impl<F, E> ExternalValidator for F
where
    F: Fn(&Value) -> Result<(), E>,
    E: Into<BoxError>,
{
    fn check(&self, value: &Value) -> Result<(), BoxError> {
        self(value).map_err(Into::into)
    }
}

/// Adapter turning an [`ExternalValidator`] into a [`Schema`]
///
/// On acceptance the input is passed through unchanged. On rejection the
/// validator's message becomes the single defect, or the generic
/// "Validation failed" when the message is blank.
///
/// # Example
/// ```
/// use basis_core::schema::{ExternalSchema, Schema};
/// use serde_json::{json, Value};
///
/// let schema = ExternalSchema::named("string-only", |value: &Value| {
///     if value.is_string() { Ok(()) } else { Err("expected string") }
/// });
///
/// assert_eq!(schema.validate(&json!("fine")).unwrap(), json!("fine"));
/// assert_eq!(schema.validate(&json!(123)).unwrap_err().to_string(), "expected string");
/// ```
#[derive(Debug, Clone)]
pub struct ExternalSchema<V> {
    name: String,
    validator: V,
}

impl<V: ExternalValidator> ExternalSchema<V> {
    /// Wrap a validator, taking its self-reported name if it has one
    pub fn new(validator: V) -> Self {
        let name = validator.name().unwrap_or(UNNAMED_EXTERNAL).to_string();
        Self { name, validator }
    }

    /// Wrap a validator under an explicit name
    pub fn named(name: impl Into<String>, validator: V) -> Self {
        Self {
            name: name.into(),
            validator,
        }
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }
}

impl<V: ExternalValidator> Schema for ExternalSchema<V> {
    type Output = Value;

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, input: &Value) -> Validation<Value> {
        match self.validator.check(input) {
            Ok(()) => Ok(input.clone()),
            Err(err) => {
                let message = err.to_string();
                let message = if message.trim().is_empty() {
                    GENERIC_REJECTION.to_string()
                } else {
                    message
                };
                Err(ValidationError::single(Defect::External {
                    schema: self.name.clone(),
                    message,
                }))
            }
        }
    }
}
