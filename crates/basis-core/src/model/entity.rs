use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::rules::validation::BASE_FIELDS;

use super::timestamp::Timestamp;
use super::version::{EntityVersion, VersionScheme};

/// Opaque identity token of an entity
///
/// Uniqueness within a type's namespace is the owning feature's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// BaseEntity - the shared shape of every identified, versioned record
///
/// Subtype-specific fields travel in `extra` and are flattened beside the
/// base fields when serialized, so a subtype survives a base-only schema
/// check untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseEntity {
    /// Identity token, immutable after creation
    pub id: EntityId,

    /// Discriminator naming the concrete entity kind
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Revision counter in the configured encoding
    pub version: EntityVersion,

    /// Set once at creation
    pub created_at: Timestamp,

    /// Never earlier than `created_at`
    pub updated_at: Timestamp,

    /// Fields the base contract does not own
    ///
    /// Keys naming a base field are never serialized, so they cannot shadow
    /// the typed fields above.
    #[serde(flatten, serialize_with = "serialize_unowned")]
    pub extra: Map<String, Value>,
}

fn serialize_unowned<S: Serializer>(extra: &Map<String, Value>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        extra
            .iter()
            .filter(|(key, _)| !BASE_FIELDS.contains(&key.as_str())),
    )
}

impl BaseEntity {
    /// Create a new entity at its minimum version
    ///
    /// Both timestamps are set to `now` in canonical form.
    pub fn new(
        id: impl Into<String>,
        entity_type: impl Into<String>,
        scheme: VersionScheme,
        now: DateTime<Utc>,
    ) -> Self {
        let stamp = Timestamp::from_instant(now);
        Self {
            id: EntityId::new(id),
            entity_type: entity_type.into(),
            version: scheme.initial(),
            created_at: stamp.clone(),
            updated_at: stamp,
            extra: Map::new(),
        }
    }

    /// Attach a subtype-specific field
    ///
    /// Keys naming a base field are ignored.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !BASE_FIELDS.contains(&key.as_str()) {
            self.extra.insert(key, value);
        }
        self
    }

    pub fn created_at_instant(&self) -> DateTime<Utc> {
        self.created_at.instant()
    }

    pub fn updated_at_instant(&self) -> DateTime<Utc> {
        self.updated_at.instant()
    }

    /// Check if the entity has never been bumped since creation
    pub fn is_pristine(&self) -> bool {
        self.version == self.version.scheme().initial() && self.created_at == self.updated_at
    }
}
