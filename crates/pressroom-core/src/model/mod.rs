pub mod document;
pub mod section;
pub mod version;

pub use document::Document;
pub use section::{
    CtaProps, Feature, FeatureGridProps, HeroProps, Section, SectionBody, SectionType,
    TestimonialProps,
};
pub use version::Version;
