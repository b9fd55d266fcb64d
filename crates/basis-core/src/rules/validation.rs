use serde_json::Value;

use crate::errors::Defect;
use crate::model::{
    EntityId, EntityVersion, SemanticVersion, Timestamp, TimestampStrictness, VersionScheme,
};

pub const FIELD_ID: &str = "id";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_VERSION: &str = "version";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_UPDATED_AT: &str = "updatedAt";

/// Every field the base contract defines
pub const BASE_FIELDS: [&str; 5] = [
    FIELD_ID,
    FIELD_TYPE,
    FIELD_VERSION,
    FIELD_CREATED_AT,
    FIELD_UPDATED_AT,
];

/// Short name of a JSON value's kind for defect messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn missing(field: &str) -> Defect {
    Defect::field(field, "is required")
}

/// `id` must be a string that is non-empty after trimming
pub fn check_id(value: Option<&Value>) -> Result<EntityId, Defect> {
    match value {
        None => Err(missing(FIELD_ID)),
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(EntityId::new(id.clone())),
        Some(Value::String(_)) => Err(Defect::field(FIELD_ID, "must be a non-empty string")),
        Some(other) => Err(Defect::field(
            FIELD_ID,
            format!("must be a non-empty string, got {}", json_kind(other)),
        )),
    }
}

/// `type` must be a non-empty string; any value is a legal entity kind
pub fn check_type(value: Option<&Value>) -> Result<String, Defect> {
    match value {
        None => Err(missing(FIELD_TYPE)),
        Some(Value::String(kind)) if !kind.is_empty() => Ok(kind.clone()),
        Some(Value::String(_)) => Err(Defect::field(FIELD_TYPE, "must be a non-empty string")),
        Some(other) => Err(Defect::field(
            FIELD_TYPE,
            format!("must be a non-empty string, got {}", json_kind(other)),
        )),
    }
}

/// `version` must match the configured encoding exactly
pub fn check_version(value: Option<&Value>, scheme: VersionScheme) -> Result<EntityVersion, Defect> {
    let value = value.ok_or_else(|| missing(FIELD_VERSION))?;
    match scheme {
        VersionScheme::Counter => match value.as_u64() {
            Some(n) => Ok(EntityVersion::Counter(n)),
            None => Err(Defect::field(
                FIELD_VERSION,
                format!("must be a non-negative integer, got {}", value),
            )),
        },
        VersionScheme::Semantic => match value {
            Value::String(raw) if SemanticVersion::is_well_formed(raw) => {
                Ok(EntityVersion::Semantic(raw.clone()))
            }
            other => Err(Defect::field(
                FIELD_VERSION,
                format!("must be a MAJOR.MINOR.PATCH string, got {}", other),
            )),
        },
    }
}

/// A timestamp field must parse under the configured strictness
pub fn check_timestamp(
    field: &str,
    value: Option<&Value>,
    strictness: TimestampStrictness,
) -> Result<Timestamp, Defect> {
    let value = value.ok_or_else(|| missing(field))?;
    let expected = match strictness {
        TimestampStrictness::Tolerant => "must be a valid ISO-8601 date-time",
        TimestampStrictness::Strict => "must be a canonical ISO-8601 date-time (YYYY-MM-DDTHH:MM:SS.sssZ)",
    };
    match value {
        Value::String(raw) => Timestamp::parse(raw, strictness)
            .ok_or_else(|| Defect::field(field, format!("{}, got {:?}", expected, raw))),
        other => Err(Defect::field(
            field,
            format!("{}, got {}", expected, json_kind(other)),
        )),
    }
}

/// `updatedAt` may equal `createdAt` but never precede it
pub fn check_ordering(created_at: &Timestamp, updated_at: &Timestamp) -> Option<Defect> {
    (updated_at.instant() < created_at.instant()).then(|| Defect::Ordering {
        created_at: created_at.as_str().to_string(),
        updated_at: updated_at.as_str().to_string(),
    })
}
