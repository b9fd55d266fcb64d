//! Validation contracts
//!
//! A [`Schema`] checks an arbitrary JSON value and either accepts it,
//! producing a normalized output, or rejects it with every defect found.
//!
//! - [`BaseEntitySchema`] - the built-in contract for [`BaseEntity`](crate::model::BaseEntity)
//! - [`ExternalSchema`] - adapter over any pass/fail validator

pub mod base;
pub mod external;

pub use base::BaseEntitySchema;
pub use external::{BoxError, ExternalSchema, ExternalValidator};

use serde_json::Value;

use crate::errors::{Result, ValidationError};

/// Outcome of a schema check: the normalized value or all defects
pub type Validation<T> = std::result::Result<T, ValidationError>;

/// A named validation contract
pub trait Schema {
    /// Normalized value produced on acceptance
    type Output;

    /// Name used in logs and rejection messages
    fn name(&self) -> &str;

    /// Check an input of unknown shape
    fn validate(&self, input: &Value) -> Validation<Self::Output>;
}

/// Validate and convert a rejection into the crate error
///
/// # Errors
/// `Validation` carrying every defect the schema reported.
pub fn ensure_valid<S>(schema: &S, value: &Value) -> Result<S::Output>
where
    S: Schema + ?Sized,
{
    Ok(schema.validate(value)?)
}
