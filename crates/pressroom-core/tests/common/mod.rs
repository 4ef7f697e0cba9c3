use pressroom_core::model::{
    CtaProps, Document, Feature, FeatureGridProps, HeroProps, Section, SectionBody,
    TestimonialProps,
};

#[allow(dead_code)]
pub fn hero(id: &str, heading: &str) -> Section {
    Section::new(
        id,
        SectionBody::Hero(HeroProps {
            heading: heading.to_string(),
            subheading: None,
        }),
    )
}

#[allow(dead_code)]
pub fn cta(id: &str, label: &str, url: &str) -> Section {
    Section::new(
        id,
        SectionBody::Cta(CtaProps {
            label: label.to_string(),
            url: url.to_string(),
        }),
    )
}

#[allow(dead_code)]
pub fn testimonial(id: &str, quote: &str, author: &str) -> Section {
    Section::new(
        id,
        SectionBody::Testimonial(TestimonialProps {
            quote: quote.to_string(),
            author: author.to_string(),
        }),
    )
}

#[allow(dead_code)]
pub fn feature_grid(id: &str, features: &[(&str, &str)]) -> Section {
    Section::new(
        id,
        SectionBody::FeatureGrid(FeatureGridProps {
            features: features
                .iter()
                .map(|(title, body)| Feature {
                    title: title.to_string(),
                    body: body.to_string(),
                })
                .collect(),
        }),
    )
}

/// Document under slug `home` with the given sections
#[allow(dead_code)]
pub fn page(sections: Vec<Section>) -> Document {
    Document {
        id: "page-home".to_string(),
        slug: "home".to_string(),
        title: "Home".to_string(),
        sections,
    }
}
