//! Basis Core - validation and controlled mutation of base entities
//!
//! This crate provides the pure kernel shared by every entity-owning feature:
//! - The `BaseEntity` model (identity, type, version, timestamps, extras)
//! - The `Schema` contract with a built-in base entity schema
//! - An adapter that lifts pass/fail external validators into `Schema`
//! - The `VersionController`, the only sanctioned way to advance an entity
//! - Error and logging facilities shared with the engine layer
//!
//! All kernel operations are synchronous pure functions with no shared
//! state; they may be called from any number of threads at once.

pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod rules;
pub mod schema;

pub use basis_core_types as core_types;

// Re-export commonly used types
pub use config::SchemaConfig;
pub use errors::{BasisError, Defect, ExError, ExErrorKind, Result, ValidationError};
pub use model::{
    BaseEntity, EntityId, EntityVersion, SemanticVersion, Timestamp, TimestampStrictness,
    VersionScheme,
};
pub use ops::{bump_version, VersionController};
pub use schema::{ensure_valid, BaseEntitySchema, ExternalSchema, ExternalValidator, Schema, Validation};
