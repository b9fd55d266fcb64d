mod common;

use basis_core::{
    BaseEntity, BaseEntitySchema, BasisError, Defect, EntityVersion, Schema, SchemaConfig,
    VersionController,
};
use common::{at, raw_entity_between};
use serde_json::json;

// Scenario C: every defect of a badly broken entity is reported at once

#[test]
fn test_all_defects_reported_together() {
    let schema = BaseEntitySchema::new(SchemaConfig::counter());
    let err = schema
        .validate(&json!({
            "id": "",
            "type": "product",
            "version": -1,
            "createdAt": "not-a-date",
            "updatedAt": "also-not-a-date",
        }))
        .unwrap_err();

    assert!(err.len() >= 4);
    for field in ["id", "version", "createdAt", "updatedAt"] {
        assert!(err.has_field(field), "missing defect for {field}");
    }
    assert!(!err.has_field("type"));
    assert_eq!(err.to_string().matches("; ").count(), err.len() - 1);
}

#[test]
fn test_semantic_schema_reports_same_defects() {
    let err = BaseEntitySchema::default()
        .validate(&json!({
            "id": "",
            "type": "product",
            "version": "not-a-version",
            "createdAt": "not-a-date",
            "updatedAt": "also-not-a-date",
        }))
        .unwrap_err();

    assert_eq!(err.len(), 4);
}

#[test]
fn test_updated_before_created_fails_closed() {
    let raw = raw_entity_between(
        json!("1.0.0"),
        "2025-01-01T04:00:00.000Z",
        "2025-01-01T03:00:00.000Z",
    );

    let err = BaseEntitySchema::default().validate(&raw).unwrap_err();
    assert!(matches!(err.defects(), [Defect::Ordering { .. }]));

    let bump_err = VersionController::default()
        .bump_value(&raw, Some(at("2025-01-01T05:00:00Z")))
        .unwrap_err();
    assert_eq!(bump_err, BasisError::Validation(err));
}

#[test]
fn test_hand_built_invalid_entity_cannot_be_bumped() {
    let mut entity = BaseEntity::new(
        "abc",
        "product",
        basis_core::VersionScheme::Semantic,
        at("2025-01-01T00:00:00Z"),
    );
    entity.version = EntityVersion::Semantic("1.0".to_string());
    entity.entity_type = String::new();

    let err = VersionController::default()
        .bump(&entity, Some(at("2025-01-01T01:00:00Z")))
        .unwrap_err();

    assert_eq!(err.defects().len(), 2);
}
