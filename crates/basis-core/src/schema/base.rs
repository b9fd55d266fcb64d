use serde_json::{Map, Value};

use super::{Schema, Validation};
use crate::config::SchemaConfig;
use crate::errors::{Defect, ValidationError};
use crate::model::BaseEntity;
use crate::rules::validation::{
    self, json_kind, BASE_FIELDS, FIELD_CREATED_AT, FIELD_ID, FIELD_TYPE, FIELD_UPDATED_AT,
    FIELD_VERSION,
};

/// The built-in contract for [`BaseEntity`]
///
/// All field rules run on every call; the rejection lists each defect in
/// field order (`id`, `type`, `version`, `createdAt`, `updatedAt`) followed
/// by the ordering check, which only runs when both timestamps parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseEntitySchema {
    config: SchemaConfig,
}

impl BaseEntitySchema {
    pub fn new(config: SchemaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }
}

/// Raw fields the base contract does not own, in input order
fn unowned_fields(raw: &Map<String, Value>) -> Map<String, Value> {
    raw.iter()
        .filter(|(key, _)| !BASE_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

impl Schema for BaseEntitySchema {
    type Output = BaseEntity;

    fn name(&self) -> &str {
        &self.config.name
    }

    fn validate(&self, input: &Value) -> Validation<BaseEntity> {
        let Some(raw) = input.as_object() else {
            return Err(ValidationError::single(Defect::Shape {
                found: json_kind(input).to_string(),
            }));
        };

        let id = validation::check_id(raw.get(FIELD_ID));
        let entity_type = validation::check_type(raw.get(FIELD_TYPE));
        let version = validation::check_version(raw.get(FIELD_VERSION), self.config.version_scheme);
        let strictness = self.config.timestamp_strictness;
        let created_at =
            validation::check_timestamp(FIELD_CREATED_AT, raw.get(FIELD_CREATED_AT), strictness);
        let updated_at =
            validation::check_timestamp(FIELD_UPDATED_AT, raw.get(FIELD_UPDATED_AT), strictness);

        match (id, entity_type, version, created_at, updated_at) {
            (Ok(id), Ok(entity_type), Ok(version), Ok(created_at), Ok(updated_at)) => {
                if let Some(defect) = validation::check_ordering(&created_at, &updated_at) {
                    return Err(ValidationError::single(defect));
                }
                // Owned fields come from the validated values; everything
                // else (including `type`) is taken from the raw input.
                Ok(BaseEntity {
                    id,
                    entity_type,
                    version,
                    created_at,
                    updated_at,
                    extra: unowned_fields(raw),
                })
            }
            (id, entity_type, version, created_at, updated_at) => {
                let mut defects: Vec<Defect> = [
                    id.err(),
                    entity_type.err(),
                    version.err(),
                ]
                .into_iter()
                .flatten()
                .collect();
                match (created_at, updated_at) {
                    (Ok(created_at), Ok(updated_at)) => {
                        defects.extend(validation::check_ordering(&created_at, &updated_at));
                    }
                    (created_at, updated_at) => {
                        defects.extend(created_at.err());
                        defects.extend(updated_at.err());
                    }
                }
                Err(ValidationError::new(defects))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityVersion, TimestampStrictness};
    use serde_json::json;

    fn product(version: Value) -> Value {
        json!({
            "id": "abc",
            "type": "product",
            "version": version,
            "createdAt": "2025-01-01T00:00:00.000Z",
            "updatedAt": "2025-01-01T00:00:00.000Z",
        })
    }

    #[test]
    fn test_accepts_semantic_entity() {
        let schema = BaseEntitySchema::default();
        let entity = schema.validate(&product(json!("1.0.0"))).unwrap();
        assert_eq!(entity.entity_type, "product");
        assert_eq!(entity.version, EntityVersion::Semantic("1.0.0".to_string()));
    }

    #[test]
    fn test_counter_schema_rejects_semantic_version() {
        let schema = BaseEntitySchema::new(SchemaConfig::counter());
        let err = schema.validate(&product(json!("1.0.0"))).unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.has_field("version"));
    }

    #[test]
    fn test_rejects_non_object() {
        let schema = BaseEntitySchema::default();
        for input in [json!(null), json!(3), json!("abc"), json!([1, 2])] {
            let err = schema.validate(&input).unwrap_err();
            assert!(matches!(err.defects()[0], Defect::Shape { .. }));
        }
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let err = BaseEntitySchema::default().validate(&json!({})).unwrap_err();
        assert_eq!(err.len(), 5);
        assert_eq!(
            err.to_string(),
            "id is required; type is required; version is required; \
             createdAt is required; updatedAt is required"
        );
    }

    #[test]
    fn test_ordering_reported_alongside_field_defects() {
        let err = BaseEntitySchema::default()
            .validate(&json!({
                "id": "",
                "type": "product",
                "version": "1.0.0",
                "createdAt": "2025-01-01T04:00:00Z",
                "updatedAt": "2025-01-01T03:00:00Z",
            }))
            .unwrap_err();
        assert_eq!(err.len(), 2);
        assert!(err.has_field("id"));
        assert!(matches!(err.defects()[1], Defect::Ordering { .. }));
    }

    #[test]
    fn test_strict_schema_rejects_missing_millis() {
        let schema = BaseEntitySchema::new(
            SchemaConfig::default().with_strictness(TimestampStrictness::Strict),
        );
        let mut input = product(json!("1.0.0"));
        input["createdAt"] = json!("2025-01-01T00:00:00Z");
        let err = schema.validate(&input).unwrap_err();
        assert!(err.has_field("createdAt"));
        assert!(!err.has_field("updatedAt"));
    }

    #[test]
    fn test_unowned_fields_are_kept() {
        let mut input = product(json!("1.0.0"));
        input["sku"] = json!("X-1");
        input["tags"] = json!(["a"]);
        let entity = BaseEntitySchema::default().validate(&input).unwrap();
        assert_eq!(entity.extra.len(), 2);
        assert_eq!(entity.extra["sku"], json!("X-1"));
    }
}
