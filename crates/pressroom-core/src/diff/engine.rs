//! Diff computation engine.
//!
//! The entry point is [`diff`], which compares two documents by section id.

use crate::diff::model::{Change, ChangeType, DiffResult};
use crate::model::{Document, Section};
use std::collections::HashMap;

/// Index a document's sections by id.
///
/// Validation rejects duplicate ids before a document reaches the engine;
/// should one slip through, the first occurrence wins.
fn index_sections(doc: &Document) -> HashMap<&str, &Section> {
    let mut map = HashMap::with_capacity(doc.sections.len());
    for section in &doc.sections {
        map.entry(section.id.as_str()).or_insert(section);
    }
    map
}

/// Classify a candidate section against its previous counterpart, if any.
fn classify(candidate: &Section, previous: Option<&Section>) -> Option<Change> {
    let Some(previous) = previous else {
        return Some(Change::new(
            &candidate.id,
            ChangeType::Added,
            format!("Added {} section", candidate.section_type()),
        ));
    };

    // A type change is never reported as a content edit, even when props differ too
    if previous.section_type() != candidate.section_type() {
        return Some(Change::new(
            &candidate.id,
            ChangeType::TypeChanged,
            format!(
                "Changed section type from {} to {}",
                previous.section_type(),
                candidate.section_type()
            ),
        ));
    }

    if previous.body != candidate.body {
        return Some(Change::new(
            &candidate.id,
            ChangeType::ContentChanged,
            format!("Updated {} content", candidate.section_type()),
        ));
    }

    None
}

/// Compute the ordered change list turning `previous` into `candidate`.
///
/// Candidate sections are walked in order first (added / type-changed /
/// content-changed), then previous sections in order (removed). Section
/// position is not compared, so a pure reorder produces an empty result.
/// Diffing against [`Document::empty`] reports every candidate section as
/// added.
pub fn diff(candidate: &Document, previous: &Document) -> DiffResult {
    let previous_by_id = index_sections(previous);
    let candidate_by_id = index_sections(candidate);

    let mut changes: Vec<Change> = candidate
        .sections
        .iter()
        .filter_map(|section| classify(section, previous_by_id.get(section.id.as_str()).copied()))
        .collect();

    changes.extend(
        previous
            .sections
            .iter()
            .filter(|section| !candidate_by_id.contains_key(section.id.as_str()))
            .map(|section| {
                Change::new(
                    &section.id,
                    ChangeType::Removed,
                    format!("Removed {} section", section.section_type()),
                )
            }),
    );

    DiffResult::from_changes(changes)
}
