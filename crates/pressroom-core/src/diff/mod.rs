//! Document diff engine.
//!
//! Compares a candidate document against the previously published one and
//! produces an ordered, categorised change list that drives version bumps
//! and changelogs.
//!
//! ## Entry point
//!
//! ```
//! use pressroom_core::diff::diff;
//! use pressroom_core::model::{Document, Section, SectionType};
//!
//! let draft = Document::new("p1", "home", "Home")
//!     .with_section(Section::with_defaults("hero-1", SectionType::Hero));
//!
//! let result = diff(&draft, &Document::empty());
//! assert!(result.has_changes());
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: no I/O, no shared state; identical inputs give identical output.
//! - **Identity by id**: sections are matched by `id`, never by position.
//! - **Reordering is not a change**: moving a section alone yields no entries.
//! - **Ordering**: candidate-side changes in candidate order, then removals in
//!   previous order.

pub mod engine;
pub mod model;

pub use engine::diff;
pub use model::{Change, ChangeType, DiffResult};
