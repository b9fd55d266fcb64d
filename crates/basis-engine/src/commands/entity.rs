//! Entity command handlers with boundary logging.
//!
//! This module provides command handlers for entity operations:
//! - Validate a raw value against the base entity schema
//! - Bump an entity's version and `updatedAt`
//! - Check a raw value against an external validator
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for entity operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The kernel in `basis-core` emits nothing.

use basis_core_types::RequestContext;
use basis_core::errors::{ExError, Result};
use basis_core::schema::{ensure_valid, ExternalSchema, ExternalValidator, Schema};
use basis_core::{log_op_end, log_op_error, log_op_start};
use basis_core::{BaseEntity, BaseEntitySchema, SchemaConfig, VersionController};
use chrono::{DateTime, Utc};
use serde_json::Value;

fn trace_id(ctx: &RequestContext) -> Option<&str> {
    ctx.trace_id.as_ref().map(|id| id.as_str())
}

/// `id` of a raw value for log correlation, empty when absent
fn raw_id(raw: &Value) -> &str {
    raw.get("id").and_then(Value::as_str).unwrap_or_default()
}

/// Validate a raw value against the base entity schema
///
/// ## Returns
///
/// The normalized entity, with fields the schema does not own preserved in
/// `extra`.
///
/// ## Errors
///
/// - `Validation`: every defect found in the value
pub fn entity_validate(
    raw: &Value,
    config: &SchemaConfig,
    ctx: &RequestContext,
) -> Result<BaseEntity> {
    let op = "entity_validate";
    log_op_start!(
        op,
        request_id = ctx.request_id.as_str(),
        trace_id = trace_id(ctx),
        entity_id = raw_id(raw),
        schema = config.name.as_str()
    );
    let start = std::time::Instant::now();

    let entity = ensure_valid(&BaseEntitySchema::new(config.clone()), raw).map_err(|e| {
        log_op_error!(
            op,
            ExError::from(e.clone()).with_op(op).with_context(ctx),
            duration_ms = start.elapsed().as_millis() as u64,
            entity_id = raw_id(raw)
        );
        e
    })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        entity_id = entity.id.as_str(),
        entity_type = entity.entity_type.as_str(),
        version = %entity.version
    );

    Ok(entity)
}

/// Bump a raw entity to its next revision
///
/// ## Arguments
///
/// - `raw`: Entity in its JSON form
/// - `reference`: Instant of the change (defaults to now)
/// - `config`: Version encoding and timestamp strictness
/// - `ctx`: Request correlation
///
/// ## Errors
///
/// - `Validation`: the entity does not satisfy the schema
/// - `VersionParse`: the stored version cannot be advanced
pub fn entity_bump(
    raw: &Value,
    reference: Option<DateTime<Utc>>,
    config: &SchemaConfig,
    ctx: &RequestContext,
) -> Result<BaseEntity> {
    let op = "entity_bump";
    log_op_start!(
        op,
        request_id = ctx.request_id.as_str(),
        trace_id = trace_id(ctx),
        entity_id = raw_id(raw)
    );
    let start = std::time::Instant::now();

    let controller = VersionController::with_config(config.clone());
    let entity = controller.bump_value(raw, reference).map_err(|e| {
        log_op_error!(
            op,
            ExError::from(e.clone()).with_op(op).with_context(ctx),
            duration_ms = start.elapsed().as_millis() as u64,
            entity_id = raw_id(raw)
        );
        e
    })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        entity_id = entity.id.as_str(),
        entity_type = entity.entity_type.as_str(),
        version = %entity.version,
        updated_at = entity.updated_at.as_str()
    );

    Ok(entity)
}

/// Check a raw value against an external validator
///
/// ## Returns
///
/// The input, unchanged, when the validator accepts it.
///
/// ## Errors
///
/// - `Validation`: a single external defect carrying the validator's message
pub fn entity_check_external<V: ExternalValidator>(
    schema: &ExternalSchema<V>,
    raw: &Value,
    ctx: &RequestContext,
) -> Result<Value> {
    let op = "entity_check_external";
    log_op_start!(
        op,
        request_id = ctx.request_id.as_str(),
        trace_id = trace_id(ctx),
        schema = schema.name()
    );
    let start = std::time::Instant::now();

    let value = ensure_valid(schema, raw).map_err(|e| {
        log_op_error!(
            op,
            ExError::from(e.clone()).with_op(op).with_context(ctx),
            duration_ms = start.elapsed().as_millis() as u64,
            schema = schema.name()
        );
        e
    })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        schema = schema.name()
    );

    Ok(value)
}
