use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// Parse an RFC 3339 instant for use as a bump reference
#[allow(dead_code)]
pub fn at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .unwrap()
        .with_timezone(&Utc)
}

/// Raw entity with `createdAt == updatedAt`
#[allow(dead_code)]
pub fn raw_entity(version: Value, stamp: &str) -> Value {
    json!({
        "id": "abc",
        "type": "product",
        "version": version,
        "createdAt": stamp,
        "updatedAt": stamp,
    })
}

/// Raw entity with distinct timestamps
#[allow(dead_code)]
pub fn raw_entity_between(version: Value, created_at: &str, updated_at: &str) -> Value {
    json!({
        "id": "abc",
        "type": "product",
        "version": version,
        "createdAt": created_at,
        "updatedAt": updated_at,
    })
}
