//! Diff output types.

use serde::{Deserialize, Serialize};

/// Category of a single section-level change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeType {
    /// Section present in candidate but not in previous
    Added,
    /// Section present in previous but not in candidate
    Removed,
    /// Same section id, different section type
    TypeChanged,
    /// Same section id and type, different props
    ContentChanged,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::Removed => "removed",
            ChangeType::TypeChanged => "type-changed",
            ChangeType::ContentChanged => "content-changed",
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One categorised change to a section
///
/// Only the diff engine constructs these; fields are read-only outside the
/// crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    section_id: String,
    change_type: ChangeType,
    description: String,
}

impl Change {
    pub(crate) fn new(
        section_id: impl Into<String>,
        change_type: ChangeType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            section_id: section_id.into(),
            change_type,
            description: description.into(),
        }
    }

    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    pub fn change_type(&self) -> ChangeType {
        self.change_type
    }

    /// Human-readable one-line description
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Ordered change list produced by [`crate::diff::diff`]
///
/// `has_changes` is always derived from the change list; it is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffResult {
    changes: Vec<Change>,
}

impl DiffResult {
    pub(crate) fn from_changes(changes: Vec<Change>) -> Self {
        Self { changes }
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Number of changes of the given category
    pub fn count(&self, change_type: ChangeType) -> usize {
        self.changes
            .iter()
            .filter(|c| c.change_type == change_type)
            .count()
    }
}

/// Wire form: `{ "hasChanges": bool, "changes": [...] }`
impl Serialize for DiffResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("DiffResult", 2)?;
        state.serialize_field("hasChanges", &self.has_changes())?;
        state.serialize_field("changes", &self.changes)?;
        state.end()
    }
}
