//! Engine-level entity commands dispatched through one entry point.

use crate::commands::entity::{entity_bump, entity_validate};
use basis_core_types::RequestContext;
use basis_core::errors::Result;
use basis_core::{BaseEntity, SchemaConfig};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Engine-level commands over raw entity values.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Validate a raw entity.
    Validate { raw: Value },
    /// Bump a raw entity's version and `updatedAt`.
    Bump {
        raw: Value,
        /// Instant of the change; None uses the current time.
        reference: Option<DateTime<Utc>>,
    },
}

/// Result of applying an engine command.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommandResult {
    /// Entity passed validation.
    Validated(BaseEntity),
    /// Entity was advanced to its next revision.
    Bumped(BaseEntity),
}

impl EngineCommandResult {
    /// The entity produced by the command
    pub fn entity(&self) -> &BaseEntity {
        match self {
            EngineCommandResult::Validated(entity) | EngineCommandResult::Bumped(entity) => entity,
        }
    }

    pub fn into_entity(self) -> BaseEntity {
        match self {
            EngineCommandResult::Validated(entity) | EngineCommandResult::Bumped(entity) => entity,
        }
    }
}

/// Apply an engine command under a schema configuration.
///
/// # Errors
/// Whatever the dispatched command returns.
pub fn apply_engine_command(
    cmd: EngineCommand,
    config: &SchemaConfig,
    ctx: &RequestContext,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Validate { raw } => {
            entity_validate(&raw, config, ctx).map(EngineCommandResult::Validated)
        }
        EngineCommand::Bump { raw, reference } => {
            entity_bump(&raw, reference, config, ctx).map(EngineCommandResult::Bumped)
        }
    }
}
