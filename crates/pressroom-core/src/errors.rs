use pressroom_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure in the publish pipeline is classified by exactly one kind.
/// Each kind maps to a stable error code used by callers, tests and the CLI
/// to tell the failure classes apart without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Input
    /// Candidate document is structurally invalid
    Validation,
    /// A version string could not be parsed
    InvalidVersion,

    // Gate
    /// The publish gate refused the request
    PublishDenied,

    // Store
    /// No snapshot exists for the requested slug/version
    NotFound,
    /// Backend unreachable or timed out (transient, retryable)
    StoreUnavailable,
    /// A snapshot already exists for `(slug, version)`
    VersionConflict,
    /// A stored snapshot could not be decoded or disagrees with its key
    CorruptSnapshot,

    // Arithmetic
    /// A version component would exceed its integer range
    VersionOverflow,

    // Integration
    Serialization,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Validation => "ERR_VALIDATION",
            ExErrorKind::InvalidVersion => "ERR_INVALID_VERSION",
            ExErrorKind::PublishDenied => "ERR_PUBLISH_DENIED",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::StoreUnavailable => "ERR_STORE_UNAVAILABLE",
            ExErrorKind::VersionConflict => "ERR_VERSION_CONFLICT",
            ExErrorKind::CorruptSnapshot => "ERR_CORRUPT_SNAPSHOT",
            ExErrorKind::VersionOverflow => "ERR_VERSION_OVERFLOW",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether a caller may reasonably retry the same request unchanged
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ExErrorKind::StoreUnavailable | ExErrorKind::VersionConflict
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the publish context (operation, slug,
/// version, section) needed to act on the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    slug: Option<String>,
    version: Option<String>,
    section_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    issues: Vec<ValidationIssue>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            slug: None,
            version: None,
            section_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            issues: Vec::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add document slug context
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Add version context
    pub fn with_version(mut self, version: impl ToString) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Add section ID context
    pub fn with_section_id(mut self, id: impl Into<String>) -> Self {
        self.section_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the validation issues that caused a `Validation` error
    pub fn with_issues(mut self, issues: Vec<ValidationIssue>) -> Self {
        self.issues = issues;
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn section_id(&self) -> Option<&str> {
        self.section_id.as_deref()
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

    /// Validation issues, empty for every other kind
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
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
        if let Some(slug) = &self.slug {
            write!(f, " (slug: {})", slug)?;
        }
        if let Some(version) = &self.version {
            write!(f, " (version: {})", version)?;
        }
        if let Some(section_id) = &self.section_id {
            write!(f, " (section_id: {})", section_id)?;
        }
        for issue in &self.issues {
            write!(f, "\n  - {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// A single structural problem found in a candidate document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Document slug is empty
    #[error("Slug is required")]
    EmptySlug,

    /// Slug contains characters that cannot form a storage key segment
    #[error("Slug '{slug}' must contain only lowercase letters, digits, '-' or '_'")]
    InvalidSlug { slug: String },

    /// Document slug differs from the slug it is being published under
    #[error("Document slug '{found}' does not match publish slug '{expected}'")]
    SlugMismatch { expected: String, found: String },

    /// Section at `index` has an empty id
    #[error("Section at position {index} has an empty id")]
    EmptySectionId { index: usize },

    /// Two sections share the same id
    #[error("Duplicate section id: {section_id}")]
    DuplicateSectionId { section_id: String },

    /// A required text field is empty
    #[error("Section {section_id}: {field} is required")]
    EmptyField {
        section_id: String,
        field: &'static str,
    },

    /// A URL field is not an absolute URL
    #[error("Section {section_id}: '{url}' is not a valid URL")]
    InvalidUrl { section_id: String, url: String },
}

impl ValidationIssue {
    /// Section the issue refers to, if it is section-scoped
    pub fn section_id(&self) -> Option<&str> {
        match self {
            ValidationIssue::DuplicateSectionId { section_id }
            | ValidationIssue::EmptyField { section_id, .. }
            | ValidationIssue::InvalidUrl { section_id, .. } => Some(section_id),
            _ => None,
        }
    }
}

impl From<ValidationIssue> for ExError {
    fn from(issue: ValidationIssue) -> Self {
        let mut err = ExError::new(ExErrorKind::Validation).with_message(issue.to_string());
        if let Some(section_id) = issue.section_id() {
            err = err.with_section_id(section_id);
        }
        err.with_issues(vec![issue])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_kind_codes() {
        let cases = [
            (ExErrorKind::StoreUnavailable, "ERR_STORE_UNAVAILABLE"),
            (ExErrorKind::VersionConflict, "ERR_VERSION_CONFLICT"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::CorruptSnapshot, "ERR_CORRUPT_SNAPSHOT"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_only_store_races_and_outages_are_transient() {
        assert!(ExErrorKind::StoreUnavailable.is_transient());
        assert!(ExErrorKind::VersionConflict.is_transient());
        assert!(!ExErrorKind::Validation.is_transient());
        assert!(!ExErrorKind::NotFound.is_transient());
        assert!(!ExErrorKind::PublishDenied.is_transient());
    }

    #[test]
    fn test_issue_conversion_keeps_section_context() {
        let err: ExError = ValidationIssue::EmptyField {
            section_id: "s1".to_string(),
            field: "heading",
        }
        .into();

        assert_eq!(err.kind(), ExErrorKind::Validation);
        assert_eq!(err.section_id(), Some("s1"));
        assert_eq!(err.issues().len(), 1);
        assert!(err.message().contains("heading is required"));
    }

    #[test]
    fn test_issues_empty_by_default() {
        let err = ExError::new(ExErrorKind::StoreUnavailable);
        assert!(err.issues().is_empty());
    }
}
