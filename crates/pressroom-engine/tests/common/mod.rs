#![allow(dead_code)]

use pressroom_core::model::{
    CtaProps, Document, HeroProps, Section, SectionBody, TestimonialProps, Version,
};
use pressroom_store::backend::{CreateOutcome, SnapshotBackend};
use pressroom_store::{Deadline, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn hero(id: &str, heading: &str) -> Section {
    Section::new(
        id,
        SectionBody::Hero(HeroProps {
            heading: heading.to_string(),
            subheading: None,
        }),
    )
}

pub fn cta(id: &str, label: &str) -> Section {
    Section::new(
        id,
        SectionBody::Cta(CtaProps {
            label: label.to_string(),
            url: "https://example.com/signup".to_string(),
        }),
    )
}

pub fn testimonial(id: &str, quote: &str) -> Section {
    Section::new(
        id,
        SectionBody::Testimonial(TestimonialProps {
            quote: quote.to_string(),
            author: "Ada".to_string(),
        }),
    )
}

pub fn page(slug: &str, sections: Vec<Section>) -> Document {
    Document {
        id: format!("page-{}", slug),
        slug: slug.to_string(),
        title: "Landing".to_string(),
        sections,
    }
}

pub fn v(s: &str) -> Version {
    s.parse().unwrap()
}

/// Serialized snapshot as another publisher would have written it
pub fn snapshot_bytes(version: &Version, document: &Document, changelog: &str) -> Vec<u8> {
    serde_json::to_vec_pretty(&serde_json::json!({
        "version": version.to_string(),
        "document": document,
        "changelog": changelog,
        "publishedAt": "2026-01-01T00:00:00Z",
    }))
    .unwrap()
}

/// How the spy interferes with conditional creates
pub enum Race {
    /// Pass everything through
    Off,
    /// Before the first create, a competing publisher lands this document
    /// at the same version
    CompeteOnce(Mutex<Option<Document>>),
    /// Every create finds the version taken
    AlwaysTaken,
}

#[derive(Default)]
pub struct Counters {
    pub lists: AtomicUsize,
    pub reads: AtomicUsize,
    pub creates: AtomicUsize,
}

impl Counters {
    pub fn io_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
            + self.reads.load(Ordering::SeqCst)
            + self.creates.load(Ordering::SeqCst)
    }
}

/// Backend wrapper counting calls and injecting deterministic races
pub struct SpyBackend<B> {
    inner: B,
    race: Race,
    counters: Arc<Counters>,
}

impl<B: SnapshotBackend> SpyBackend<B> {
    pub fn new(inner: B, race: Race) -> (Self, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        (
            Self {
                inner,
                race,
                counters: Arc::clone(&counters),
            },
            counters,
        )
    }
}

impl<B: SnapshotBackend> SnapshotBackend for SpyBackend<B> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn list(&self, slug: &str, deadline: &Deadline) -> Result<Vec<String>> {
        self.counters.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list(slug, deadline)
    }

    fn read(&self, slug: &str, version: &Version, deadline: &Deadline) -> Result<Option<Vec<u8>>> {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(slug, version, deadline)
    }

    fn create_if_absent(
        &self,
        slug: &str,
        version: &Version,
        bytes: &[u8],
        deadline: &Deadline,
    ) -> Result<CreateOutcome> {
        self.counters.creates.fetch_add(1, Ordering::SeqCst);
        match &self.race {
            Race::Off => {}
            Race::CompeteOnce(competitor) => {
                if let Some(doc) = competitor.lock().unwrap().take() {
                    let theirs = snapshot_bytes(version, &doc, "- competing publish");
                    self.inner.create_if_absent(slug, version, &theirs, deadline)?;
                }
            }
            Race::AlwaysTaken => return Ok(CreateOutcome::AlreadyExists),
        }
        self.inner.create_if_absent(slug, version, bytes, deadline)
    }
}
