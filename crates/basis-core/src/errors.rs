use basis_core_types::{RequestContext, RequestId, TraceId};
use thiserror::Error;

/// Result type alias using BasisError
pub type Result<T> = std::result::Result<T, BasisError>;

/// Message used when a rejection carries no usable text
pub const GENERIC_REJECTION: &str = "Validation failed";

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// parsing human-readable messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    /// Input is not an object at all
    InvalidShape,
    /// A named field is missing, mistyped or fails its predicate
    InvalidField,
    /// `updatedAt` precedes `createdAt`
    OrderingViolation,
    /// An external validator rejected the value
    ExternalRejected,

    // Version control
    /// Stored version does not match the expected pattern at bump time
    VersionParse,

    // Integration
    Config,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidShape => "ERR_INVALID_SHAPE",
            ExErrorKind::InvalidField => "ERR_INVALID_FIELD",
            ExErrorKind::OrderingViolation => "ERR_ORDERING_VIOLATION",
            ExErrorKind::ExternalRejected => "ERR_EXTERNAL_REJECTED",
            ExErrorKind::VersionParse => "ERR_VERSION_PARSE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus every
/// defect message of the failure it was built from.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    field: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    defects: Vec<String>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            field: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            defects: Vec::new(),
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Attach both correlation ids from a request context
    pub fn with_context(mut self, ctx: &RequestContext) -> Self {
        self.request_id = Some(ctx.request_id.clone());
        self.trace_id = ctx.trace_id.clone();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_defects(mut self, defects: Vec<String>) -> Self {
        self.defects = defects;
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Field named by the first defect, if that defect is field-scoped
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Every individual defect message (empty for non-validation errors)
    pub fn defects(&self) -> &[String] {
        &self.defects
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// A single problem found while validating an input value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Defect {
    /// Input is not an object/record
    Shape { found: String },

    /// One named field is missing, has the wrong type, or fails its predicate
    Field { field: String, reason: String },

    /// `updatedAt` is strictly earlier than `createdAt`
    Ordering {
        created_at: String,
        updated_at: String,
    },

    /// Rejection reported by an external validator
    External { schema: String, message: String },
}

impl Defect {
    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Defect::Field {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Error kind this defect maps to in the error facility
    pub fn kind(&self) -> ExErrorKind {
        match self {
            Defect::Shape { .. } => ExErrorKind::InvalidShape,
            Defect::Field { .. } => ExErrorKind::InvalidField,
            Defect::Ordering { .. } => ExErrorKind::OrderingViolation,
            Defect::External { .. } => ExErrorKind::ExternalRejected,
        }
    }

    /// Name of the offending field, when the defect concerns one
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Defect::Field { field, .. } => Some(field),
            Defect::Ordering { .. } => Some("updatedAt"),
            Defect::Shape { .. } | Defect::External { .. } => None,
        }
    }
}

impl std::fmt::Display for Defect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Defect::Shape { found } => write!(f, "entity must be an object, got {}", found),
            Defect::Field { field, reason } => write!(f, "{} {}", field, reason),
            Defect::Ordering {
                created_at,
                updated_at,
            } => write!(
                f,
                "updatedAt ({}) must not precede createdAt ({})",
                updated_at, created_at
            ),
            Defect::External { message, .. } => f.write_str(message),
        }
    }
}

fn join_defects(defects: &[Defect]) -> String {
    defects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Rejection of an input value, carrying every defect found
///
/// The list is never empty; its display form is the `"; "`-joined list of
/// defect messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_defects(.defects))]
pub struct ValidationError {
    defects: Vec<Defect>,
}

impl ValidationError {
    /// Build a rejection from accumulated defects
    ///
    /// An empty list is replaced by a single generic defect so that a
    /// rejection always explains itself.
    pub fn new(defects: Vec<Defect>) -> Self {
        if defects.is_empty() {
            return Self::single(Defect::External {
                schema: String::new(),
                message: GENERIC_REJECTION.to_string(),
            });
        }
        Self { defects }
    }

    pub fn single(defect: Defect) -> Self {
        Self {
            defects: vec![defect],
        }
    }

    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    pub fn into_defects(self) -> Vec<Defect> {
        self.defects
    }

    /// Human-readable message of each defect, in discovery order
    pub fn messages(&self) -> Vec<String> {
        self.defects.iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.defects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }

    /// Kind of the first defect found
    pub fn kind(&self) -> ExErrorKind {
        self.defects
            .first()
            .map(Defect::kind)
            .unwrap_or(ExErrorKind::Internal)
    }

    /// Whether any defect concerns the given field
    pub fn has_field(&self, field: &str) -> bool {
        self.defects.iter().any(|d| d.field_name() == Some(field))
    }
}

/// Error taxonomy for Basis operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BasisError {
    /// Input failed its schema; all defects are carried
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Stored version could not be parsed or advanced at bump time
    #[error("Invalid version '{version}': {reason}")]
    VersionParse { version: String, reason: String },

    /// Configuration text could not be parsed
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// Entity could not be converted to or from its JSON form
    #[error("Serialization failed: {reason}")]
    Serialization { reason: String },
}

impl BasisError {
    /// Defects of a validation failure, empty for every other error
    pub fn defects(&self) -> &[Defect] {
        match self {
            BasisError::Validation(err) => err.defects(),
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for BasisError {
    fn from(err: serde_json::Error) -> Self {
        BasisError::Serialization {
            reason: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BasisError {
    fn from(err: toml::de::Error) -> Self {
        BasisError::Config {
            reason: err.message().to_string(),
        }
    }
}

impl From<BasisError> for ExError {
    fn from(err: BasisError) -> Self {
        let message = err.to_string();
        match err {
            BasisError::Validation(validation) => {
                let mut ex = ExError::new(validation.kind())
                    .with_message(message)
                    .with_defects(validation.messages());
                if let Some(field) = validation.defects().first().and_then(Defect::field_name) {
                    ex = ex.with_field(field);
                }
                ex
            }
            BasisError::VersionParse { .. } => ExError::new(ExErrorKind::VersionParse)
                .with_field("version")
                .with_message(message),
            BasisError::Config { .. } => ExError::new(ExErrorKind::Config).with_message(message),
            BasisError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidShape,
            ExErrorKind::InvalidField,
            ExErrorKind::OrderingViolation,
            ExErrorKind::ExternalRejected,
            ExErrorKind::VersionParse,
            ExErrorKind::Config,
            ExErrorKind::Serialization,
            ExErrorKind::Internal,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(codes.iter().all(|c| c.starts_with("ERR_")));
    }

    #[test]
    fn test_validation_error_joins_with_semicolons() {
        let err = ValidationError::new(vec![
            Defect::field("id", "must be a non-empty string"),
            Defect::field("version", "is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "id must be a non-empty string; version is required"
        );
        assert_eq!(err.len(), 2);
        assert_eq!(err.kind(), ExErrorKind::InvalidField);
    }

    #[test]
    fn test_empty_validation_error_gets_generic_defect() {
        let err = ValidationError::new(Vec::new());
        assert_eq!(err.len(), 1);
        assert_eq!(err.to_string(), GENERIC_REJECTION);
    }

    #[test]
    fn test_ordering_defect_names_updated_at() {
        let defect = Defect::Ordering {
            created_at: "2025-01-01T04:00:00.000Z".to_string(),
            updated_at: "2025-01-01T03:00:00.000Z".to_string(),
        };
        assert_eq!(defect.field_name(), Some("updatedAt"));
        assert!(defect.to_string().contains("must not precede createdAt"));
    }

    #[test]
    fn test_ex_error_display_includes_code_and_op() {
        let err = ExError::new(ExErrorKind::VersionParse)
            .with_op("entity_bump")
            .with_entity_id("abc")
            .with_message("bad");
        assert_eq!(
            err.to_string(),
            "[ERR_VERSION_PARSE] in operation 'entity_bump': bad (entity_id: abc)"
        );
    }

    #[test]
    fn test_ex_error_with_context_copies_ids() {
        let ctx = RequestContext::new().with_trace_id(TraceId::from_string("t-1".to_string()));
        let err = ExError::new(ExErrorKind::Internal).with_context(&ctx);
        assert_eq!(err.request_id(), Some(&ctx.request_id));
        assert_eq!(err.trace_id().map(|t| t.as_str()), Some("t-1"));
    }
}
