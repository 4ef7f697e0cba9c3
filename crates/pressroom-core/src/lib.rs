//! Pressroom Core - pure publish pipeline kernel
//!
//! This crate provides the document model and the side-effect-free stages of
//! the publish pipeline:
//! - Document / Section model with a closed catalogue of section types
//! - Structural validation gate for candidate documents
//! - Diff engine classifying section-level changes
//! - Version calculator (bump class + checked version arithmetic)
//! - Changelog renderer
//! - Publish gate and role permissions
//! - Error and logging facilities shared by the other crates

pub mod changelog;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod policy;
pub mod rules;
pub mod semver;

#[doc(hidden)]
pub use pressroom_core_types as core_types;

// Re-export commonly used types
pub use changelog::render_changelog;
pub use diff::{diff, Change, ChangeType, DiffResult};
pub use errors::{ExError, ExErrorKind, Result, ValidationIssue};
pub use model::{Document, Section, SectionBody, SectionType, Version};
pub use policy::{AllowAllGate, DenyAllGate, PublishGate, Role, RoleGate};
pub use semver::{apply_bump, bump_class, BumpClass};
