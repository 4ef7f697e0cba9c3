use serde::{Deserialize, Serialize};

use super::section::Section;

/// Document - a page composed of ordered, typed sections
///
/// `slug` is the key a document's snapshot history is stored under. The
/// order of `sections` is the display order; it is carried into snapshots
/// but is not itself a versioning signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stable document identifier
    #[serde(rename = "pageId")]
    pub id: String,

    /// Externally addressable key used for snapshot lookups
    pub slug: String,

    /// Human-readable title
    pub title: String,

    /// Sections in display order
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a document with no sections
    pub fn new(id: impl Into<String>, slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// The canonical empty document used as the baseline for a first publish
    pub fn empty() -> Self {
        Self::new("", "", "")
    }

    /// Builder-style section append
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by id
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}
