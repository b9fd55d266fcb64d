use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::SchemaConfig;
use crate::errors::Result;
use crate::model::{BaseEntity, Timestamp};
use crate::schema::{ensure_valid, BaseEntitySchema};

/// The sanctioned way to advance an entity's `version` and `updatedAt`
///
/// Bumping is a pure function of the entity and a reference instant: the
/// input is never modified and a fresh entity is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionController {
    schema: BaseEntitySchema,
}

impl VersionController {
    pub fn new(schema: BaseEntitySchema) -> Self {
        Self { schema }
    }

    pub fn with_config(config: SchemaConfig) -> Self {
        Self::new(BaseEntitySchema::new(config))
    }

    pub fn schema(&self) -> &BaseEntitySchema {
        &self.schema
    }

    /// Advance an entity to its next revision
    ///
    /// The entity is re-validated first, so an entity assembled by hand with
    /// broken fields is never bumped. `reference` defaults to the current
    /// instant; when it is earlier than `createdAt` the new `updatedAt` is
    /// pinned to `createdAt`, rendered canonically.
    ///
    /// # Errors
    /// - `Validation` when the entity does not satisfy the schema
    /// - `VersionParse` when the stored version cannot be advanced
    pub fn bump(&self, entity: &BaseEntity, reference: Option<DateTime<Utc>>) -> Result<BaseEntity> {
        let next = self.bump_value(&serde_json::to_value(entity)?, reference)?;
        // Identity and creation time never change, whatever `extra` carries
        Ok(BaseEntity {
            id: entity.id.clone(),
            entity_type: entity.entity_type.clone(),
            created_at: entity.created_at.clone(),
            ..next
        })
    }

    /// Advance an entity given in its raw JSON form
    ///
    /// # Errors
    /// Same as [`VersionController::bump`].
    pub fn bump_value(&self, raw: &Value, reference: Option<DateTime<Utc>>) -> Result<BaseEntity> {
        let validated = ensure_valid(&self.schema, raw)?;

        let version = validated.version.next()?;
        let reference = reference.unwrap_or_else(Utc::now);
        let created = validated.created_at_instant();
        let mut updated_at = Timestamp::from_instant(reference.max(created));
        // Millisecond rendering must not drop below a finer-grained createdAt
        if updated_at.instant() < created {
            updated_at = validated.created_at.clone();
        }

        Ok(BaseEntity {
            version,
            updated_at,
            ..validated
        })
    }
}

/// Bump with the default configuration
///
/// # Errors
/// Same as [`VersionController::bump`].
pub fn bump_version(entity: &BaseEntity, reference: Option<DateTime<Utc>>) -> Result<BaseEntity> {
    VersionController::default().bump(entity, reference)
}
