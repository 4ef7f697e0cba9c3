//! Section model - the closed catalogue of section types
//!
//! A section serializes as `{ "id": ..., "type": ..., "props": {...} }`.
//! The payload shape is fixed by the type tag, so every match on
//! [`SectionBody`] is exhaustive and a new section type cannot be added
//! without deciding how it is diffed, validated and scaffolded.

use serde::{Deserialize, Serialize};

/// Section type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionType {
    Hero,
    FeatureGrid,
    Testimonial,
    Cta,
}

impl SectionType {
    /// Every section type, in catalogue order
    pub const ALL: [SectionType; 4] = [
        SectionType::Hero,
        SectionType::FeatureGrid,
        SectionType::Testimonial,
        SectionType::Cta,
    ];

    /// Wire tag used in documents and changelog text
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Hero => "hero",
            SectionType::FeatureGrid => "featureGrid",
            SectionType::Testimonial => "testimonial",
            SectionType::Cta => "cta",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroProps {
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureGridProps {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialProps {
    pub quote: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtaProps {
    pub label: String,
    pub url: String,
}

/// Typed section payload, tagged by section type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props", rename_all = "camelCase")]
pub enum SectionBody {
    Hero(HeroProps),
    FeatureGrid(FeatureGridProps),
    Testimonial(TestimonialProps),
    Cta(CtaProps),
}

impl SectionBody {
    pub fn section_type(&self) -> SectionType {
        match self {
            SectionBody::Hero(_) => SectionType::Hero,
            SectionBody::FeatureGrid(_) => SectionType::FeatureGrid,
            SectionBody::Testimonial(_) => SectionType::Testimonial,
            SectionBody::Cta(_) => SectionType::Cta,
        }
    }

    /// Placeholder content an editor inserts for a freshly added section
    ///
    /// The CTA placeholder link `#` is not an absolute URL, so a section left
    /// at its defaults fails validation and cannot be published as-is.
    pub fn default_for(section_type: SectionType) -> Self {
        match section_type {
            SectionType::Hero => SectionBody::Hero(HeroProps {
                heading: "New Hero Section".to_string(),
                subheading: Some(String::new()),
            }),
            SectionType::FeatureGrid => SectionBody::FeatureGrid(FeatureGridProps {
                features: vec![Feature {
                    title: "Feature".to_string(),
                    body: "Description".to_string(),
                }],
            }),
            SectionType::Testimonial => SectionBody::Testimonial(TestimonialProps {
                quote: "Quote text".to_string(),
                author: "Author".to_string(),
            }),
            SectionType::Cta => SectionBody::Cta(CtaProps {
                label: "Click Here".to_string(),
                url: "#".to_string(),
            }),
        }
    }
}

/// Section - one typed, identifiable block of a document
///
/// `id` is stable across edits and reordering; it is the diff key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,

    #[serde(flatten)]
    pub body: SectionBody,
}

impl Section {
    pub fn new(id: impl Into<String>, body: SectionBody) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }

    /// Create a section populated with the placeholder content for its type
    pub fn with_defaults(id: impl Into<String>, section_type: SectionType) -> Self {
        Self::new(id, SectionBody::default_for(section_type))
    }

    pub fn section_type(&self) -> SectionType {
        self.body.section_type()
    }
}
