use crate::errors::{ExError, ExErrorKind, Result, ValidationIssue};
use crate::model::{Document, Section, SectionBody};
use std::collections::HashSet;

/// Check that a slug can serve as a storage key segment.
///
/// Slugs become a directory name on the filesystem backend and a key prefix
/// on the object store, so only `[a-z0-9_-]` is accepted.
pub fn validate_slug(slug: &str) -> std::result::Result<(), ValidationIssue> {
    if slug.is_empty() {
        return Err(ValidationIssue::EmptySlug);
    }
    let ok = slug
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
    if !ok {
        return Err(ValidationIssue::InvalidSlug {
            slug: slug.to_string(),
        });
    }
    Ok(())
}

/// Schemes whose URLs always name a host
const HOST_SCHEMES: &[&str] = &["http", "https", "ws", "wss", "ftp"];

/// Absolute URL check: `scheme:rest` with an RFC 3986 scheme, non-empty
/// rest and no whitespace. Web schemes additionally need a non-empty host.
fn is_absolute_url(url: &str) -> bool {
    let Some((scheme, rest)) = url.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !scheme_ok || url.chars().any(char::is_whitespace) {
        return false;
    }

    if HOST_SCHEMES.iter().any(|s| scheme.eq_ignore_ascii_case(s)) {
        let authority = rest.trim_start_matches('/');
        let host = authority
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();
        return !host.is_empty();
    }

    !rest.strip_prefix("//").unwrap_or(rest).is_empty()
}

fn require_text(
    section_id: &str,
    field: &'static str,
    value: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    if value.is_empty() {
        issues.push(ValidationIssue::EmptyField {
            section_id: section_id.to_string(),
            field,
        });
    }
}

/// Per-type props rules
fn check_section_props(section: &Section, issues: &mut Vec<ValidationIssue>) {
    let id = section.id.as_str();
    match &section.body {
        SectionBody::Hero(props) => require_text(id, "heading", &props.heading, issues),
        // Feature titles and bodies may be blank
        SectionBody::FeatureGrid(_) => {}
        SectionBody::Testimonial(props) => {
            require_text(id, "quote", &props.quote, issues);
            require_text(id, "author", &props.author, issues);
        }
        SectionBody::Cta(props) => {
            require_text(id, "label", &props.label, issues);
            if !is_absolute_url(&props.url) {
                issues.push(ValidationIssue::InvalidUrl {
                    section_id: id.to_string(),
                    url: props.url.clone(),
                });
            }
        }
    }
}

/// Collect every structural issue in a document.
///
/// Returns an empty list for a well-formed document. Checks, in order: the
/// slug, then each section's id (non-empty, unique) and props.
pub fn validate_document(doc: &Document) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if let Err(issue) = validate_slug(&doc.slug) {
        issues.push(issue);
    }

    let mut seen = HashSet::with_capacity(doc.sections.len());
    for (index, section) in doc.sections.iter().enumerate() {
        if section.id.is_empty() {
            issues.push(ValidationIssue::EmptySectionId { index });
        } else if !seen.insert(section.id.as_str()) {
            issues.push(ValidationIssue::DuplicateSectionId {
                section_id: section.id.clone(),
            });
        }
        check_section_props(section, &mut issues);
    }

    issues
}

/// The validation gate every candidate passes before diffing.
///
/// # Errors
///
/// Returns `ExErrorKind::Validation` carrying all issues found, including a
/// mismatch between `slug` and the document's own slug.
pub fn validate_for_publish(slug: &str, doc: &Document) -> Result<()> {
    let mut issues = validate_document(doc);

    if doc.slug != slug {
        issues.push(ValidationIssue::SlugMismatch {
            expected: slug.to_string(),
            found: doc.slug.clone(),
        });
    }

    if issues.is_empty() {
        return Ok(());
    }

    Err(ExError::new(ExErrorKind::Validation)
        .with_op("validate_for_publish")
        .with_slug(slug)
        .with_message(format!("candidate document has {} issue(s)", issues.len()))
        .with_issues(issues))
}
