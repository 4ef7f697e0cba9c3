//! Validation gate scenarios.

mod common;

use common::{cta, hero, page, testimonial};
use pressroom_core::errors::{ExErrorKind, ValidationIssue};
use pressroom_core::model::{Section, SectionType};
use pressroom_core::rules::{validate_document, validate_for_publish};

#[test]
fn test_well_formed_document_passes() {
    let doc = page(vec![
        hero("h", "Hello"),
        testimonial("t", "Great", "Ada"),
        cta("c", "Go", "https://example.com"),
    ]);

    assert!(validate_document(&doc).is_empty());
    assert!(validate_for_publish("home", &doc).is_ok());
}

#[test]
fn test_default_cta_url_is_rejected() {
    // Given: a freshly added CTA keeps its placeholder "#" url
    let doc = page(vec![Section::with_defaults("c", SectionType::Cta)]);

    // When
    let err = validate_for_publish("home", &doc).unwrap_err();

    // Then: structural error naming the section
    assert_eq!(err.kind(), ExErrorKind::Validation);
    assert_eq!(
        err.issues(),
        &[ValidationIssue::InvalidUrl {
            section_id: "c".to_string(),
            url: "#".to_string(),
        }]
    );
}

#[test]
fn test_all_issues_reported_together() {
    let doc = page(vec![
        hero("dup", ""),
        hero("dup", "Second"),
        testimonial("", "Q", ""),
    ]);

    let issues = validate_document(&doc);

    assert_eq!(
        issues,
        vec![
            ValidationIssue::EmptyField {
                section_id: "dup".to_string(),
                field: "heading",
            },
            ValidationIssue::DuplicateSectionId {
                section_id: "dup".to_string(),
            },
            ValidationIssue::EmptySectionId { index: 2 },
            ValidationIssue::EmptyField {
                section_id: String::new(),
                field: "author",
            },
        ]
    );
}

#[test]
fn test_slug_mismatch_rejected() {
    let doc = page(vec![hero("h", "Hello")]);

    let err = validate_for_publish("about", &doc).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Validation);
    assert!(err.issues().contains(&ValidationIssue::SlugMismatch {
        expected: "about".to_string(),
        found: "home".to_string(),
    }));
}

#[test]
fn test_unsafe_slug_rejected() {
    let mut doc = page(vec![]);
    doc.slug = "../etc".to_string();

    let err = validate_for_publish("../etc", &doc).unwrap_err();

    assert!(matches!(
        err.issues()[0],
        ValidationIssue::InvalidSlug { .. }
    ));
}

#[test]
fn test_empty_document_is_valid() {
    assert!(validate_for_publish("home", &page(vec![])).is_ok());
}

#[test]
fn test_web_link_without_host_is_rejected() {
    // Given: CTAs whose http(s) links name no host
    let doc = page(vec![
        cta("a", "Go", "https:/"),
        cta("b", "Go", "https:///pricing"),
        cta("c", "Go", "mailto:team@example.com"),
    ]);

    // When
    let issues = validate_document(&doc);

    // Then: only the host-less web links are flagged
    assert_eq!(
        issues,
        vec![
            ValidationIssue::InvalidUrl {
                section_id: "a".to_string(),
                url: "https:/".to_string(),
            },
            ValidationIssue::InvalidUrl {
                section_id: "b".to_string(),
                url: "https:///pricing".to_string(),
            },
        ]
    );
}
