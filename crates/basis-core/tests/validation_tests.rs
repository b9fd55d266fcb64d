mod common;

use basis_core::{
    BaseEntity, BaseEntitySchema, Defect, EntityVersion, Schema, SchemaConfig,
    TimestampStrictness, VersionScheme,
};
use common::{at, raw_entity};
use serde_json::json;

#[test]
fn test_valid_entity_round_trips_unchanged() {
    let raw = json!({
        "id": "abc",
        "type": "product",
        "version": "1.4.2",
        "createdAt": "2025-01-01T00:00:00.000Z",
        "updatedAt": "2025-01-02T00:00:00.000Z",
        "sku": "X-1",
        "price": {"amount": 10, "currency": "EUR"},
    });

    let entity = BaseEntitySchema::default().validate(&raw).unwrap();

    assert_eq!(serde_json::to_value(&entity).unwrap(), raw);
}

#[test]
fn test_relaxed_timestamps_are_kept_verbatim() {
    let raw = raw_entity(json!("1.0.0"), "2025-01-01T00:00:00Z");

    let entity = BaseEntitySchema::default().validate(&raw).unwrap();

    assert_eq!(entity.created_at.as_str(), "2025-01-01T00:00:00Z");
    assert_eq!(entity.created_at_instant(), at("2025-01-01T00:00:00Z"));
    assert_eq!(serde_json::to_value(&entity).unwrap(), raw);
}

#[test]
fn test_strict_timestamps_reject_relaxed_forms() {
    let schema = BaseEntitySchema::new(
        SchemaConfig::default().with_strictness(TimestampStrictness::Strict),
    );

    let err = schema
        .validate(&raw_entity(json!("1.0.0"), "2025-01-01T00:00:00Z"))
        .unwrap_err();
    assert!(err.has_field("createdAt"));
    assert!(err.has_field("updatedAt"));

    assert!(schema
        .validate(&raw_entity(json!("1.0.0"), "2025-01-01T00:00:00.000Z"))
        .is_ok());
}

#[test]
fn test_any_type_string_is_retained() {
    for kind in ["product", "order", "Some Odd Kind", "ü"] {
        let mut raw = raw_entity(json!("1.0.0"), "2025-01-01T00:00:00.000Z");
        raw["type"] = json!(kind);
        let entity = BaseEntitySchema::default().validate(&raw).unwrap();
        assert_eq!(entity.entity_type, kind);
    }
}

#[test]
fn test_wrong_types_are_field_defects() {
    let err = BaseEntitySchema::default()
        .validate(&json!({
            "id": 7,
            "type": null,
            "version": 1,
            "createdAt": 0,
            "updatedAt": true,
        }))
        .unwrap_err();

    assert_eq!(err.len(), 5);
    assert!(err.defects().iter().all(|d| matches!(d, Defect::Field { .. })));
    assert_eq!(err.messages()[0], "id must be a non-empty string, got number");
}

#[test]
fn test_whitespace_id_is_rejected() {
    let mut raw = raw_entity(json!("1.0.0"), "2025-01-01T00:00:00.000Z");
    raw["id"] = json!("   ");

    let err = BaseEntitySchema::default().validate(&raw).unwrap_err();

    assert_eq!(err.messages(), vec!["id must be a non-empty string".to_string()]);
}

#[test]
fn test_counter_schema_accepts_zero_and_rejects_fractions() {
    let schema = BaseEntitySchema::new(SchemaConfig::counter());

    let entity = schema
        .validate(&raw_entity(json!(0), "2025-01-01T00:00:00.000Z"))
        .unwrap();
    assert_eq!(entity.version, EntityVersion::Counter(0));

    for bad in [json!(1.5), json!(-1), json!("1")] {
        let err = schema
            .validate(&raw_entity(bad, "2025-01-01T00:00:00.000Z"))
            .unwrap_err();
        assert!(err.has_field("version"));
    }
}

#[test]
fn test_semantic_schema_rejects_malformed_versions() {
    for bad in ["1.0", "v1.0.0", "1.0.0-beta", "1.0.0.0", ""] {
        let err = BaseEntitySchema::default()
            .validate(&raw_entity(json!(bad), "2025-01-01T00:00:00.000Z"))
            .unwrap_err();
        assert_eq!(err.len(), 1, "{bad}");
        assert!(err.has_field("version"));
    }
}

#[test]
fn test_new_entity_validates() {
    for scheme in [VersionScheme::Counter, VersionScheme::Semantic] {
        let entity = BaseEntity::new("abc", "product", scheme, at("2025-01-01T00:00:00.123456Z"));
        let config = SchemaConfig {
            version_scheme: scheme,
            ..SchemaConfig::default()
        };

        let value = serde_json::to_value(&entity).unwrap();
        let validated = BaseEntitySchema::new(config).validate(&value).unwrap();

        assert!(validated.is_pristine());
        assert_eq!(validated.created_at.as_str(), "2025-01-01T00:00:00.123Z");
    }
}

#[test]
fn test_schema_name_comes_from_config() {
    let schema = BaseEntitySchema::new(SchemaConfig::default().with_name("product"));
    assert_eq!(schema.name(), "product");
    assert_eq!(BaseEntitySchema::default().name(), "entity");
}
