//! Changelog renderer.
//!
//! The rendered text is stored verbatim in the snapshot it describes and is
//! never re-derived, so the format below is a persisted contract.

use crate::diff::DiffResult;

/// Rendering of a diff with no entries
pub const NO_CHANGES: &str = "No changes.";

/// Changelog reported by a publish that found nothing to write
pub const NO_CHANGES_DETECTED: &str = "No changes detected.";

/// Render one `- <description>` line per change, in diff order.
///
/// Lines are joined with `\n` and there is no trailing newline. An empty
/// diff renders [`NO_CHANGES`].
pub fn render_changelog(diff: &DiffResult) -> String {
    if !diff.has_changes() {
        return NO_CHANGES.to_string();
    }

    diff.changes()
        .iter()
        .map(|change| format!("- {}", change.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;
    use crate::model::{Document, Section, SectionType};

    #[test]
    fn test_empty_diff_renders_sentinel() {
        let doc = Document::new("p", "home", "Home");
        assert_eq!(render_changelog(&diff(&doc, &doc)), NO_CHANGES);
    }

    #[test]
    fn test_lines_follow_diff_order() {
        let previous = Document::new("p", "home", "Home")
            .with_section(Section::with_defaults("old", SectionType::Testimonial));
        let candidate = Document::new("p", "home", "Home")
            .with_section(Section::with_defaults("a", SectionType::Hero))
            .with_section(Section::with_defaults("b", SectionType::Cta));

        let text = render_changelog(&diff(&candidate, &previous));

        assert_eq!(
            text,
            "- Added hero section\n- Added cta section\n- Removed testimonial section"
        );
    }
}
