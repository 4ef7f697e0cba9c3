use pressroom_core::errors::{ExError, ExErrorKind, ValidationIssue};
use pressroom_core::model::Version;

#[test]
fn test_store_unavailable_distinct_from_not_found() {
    let unavailable = ExError::new(ExErrorKind::StoreUnavailable);
    let missing = ExError::new(ExErrorKind::NotFound);

    assert_ne!(unavailable.kind(), missing.kind());
    assert_ne!(unavailable.code(), missing.code());
    assert!(unavailable.kind().is_transient());
    assert!(!missing.kind().is_transient());
}

#[test]
fn test_display_includes_context() {
    let err = ExError::new(ExErrorKind::VersionConflict)
        .with_op("snapshot_write")
        .with_slug("home")
        .with_version(Version::new(1, 2, 0))
        .with_message("snapshot already exists");

    let rendered = err.to_string();

    assert_eq!(
        rendered,
        "[ERR_VERSION_CONFLICT] in operation 'snapshot_write': snapshot already exists \
         (slug: home) (version: 1.2.0)"
    );
}

#[test]
fn test_display_lists_validation_issues() {
    let err = ExError::new(ExErrorKind::Validation)
        .with_message("candidate document has 2 issue(s)")
        .with_issues(vec![
            ValidationIssue::EmptySlug,
            ValidationIssue::DuplicateSectionId {
                section_id: "s1".to_string(),
            },
        ]);

    let rendered = err.to_string();

    assert!(rendered.contains("\n  - Slug is required"));
    assert!(rendered.contains("\n  - Duplicate section id: s1"));
}

#[test]
fn test_invalid_version_kind_from_parse() {
    let err = "1.2".parse::<Version>().unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidVersion);
    assert_eq!(err.code(), "ERR_INVALID_VERSION");
    assert_eq!(err.op(), Some("parse_version"));
}

#[test]
fn test_every_kind_has_distinct_code() {
    let kinds = [
        ExErrorKind::Validation,
        ExErrorKind::InvalidVersion,
        ExErrorKind::PublishDenied,
        ExErrorKind::NotFound,
        ExErrorKind::StoreUnavailable,
        ExErrorKind::VersionConflict,
        ExErrorKind::CorruptSnapshot,
        ExErrorKind::VersionOverflow,
        ExErrorKind::Serialization,
        ExErrorKind::Config,
        ExErrorKind::Internal,
    ];
    let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
    assert_eq!(codes.len(), kinds.len());
    assert!(codes.iter().all(|c| c.starts_with("ERR_")));
}
