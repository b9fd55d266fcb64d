//! Canonical lifecycle logging macros
//!
//! Field keys and event names come from `basis_core_types::schema`, so every
//! command emits the same vocabulary.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use basis_core::log_op_start;
/// log_op_start!("entity_validate");
/// log_op_start!("entity_bump", entity_id = "abc");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use basis_core::log_op_end;
/// log_op_end!("entity_bump", duration_ms = 3, version = "1.0.1");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError);
/// its kind, code and defect count are recorded, along with the request and
/// trace ids when the error carries them.
///
/// # Example
///
/// ```
/// # use basis_core::log_op_error;
/// # use basis_core::errors::BasisError;
/// let err = BasisError::Config { reason: "bad".to_string() };
/// log_op_error!("entity_validate", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            defect_count = ex_err.defects().len() as u64,
            request_id = ex_err.request_id().map(|id| id.as_str()),
            trace_id = ex_err.trace_id().map(|id| id.as_str()),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            defect_count = ex_err.defects().len() as u64,
            request_id = ex_err.request_id().map(|id| id.as_str()),
            trace_id = ex_err.trace_id().map(|id| id.as_str()),
            $($field)*
        );
    }};
}
