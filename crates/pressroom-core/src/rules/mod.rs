//! Structural rules a document must satisfy before it enters the pipeline

pub mod validation;

pub use validation::{validate_document, validate_for_publish, validate_slug};
