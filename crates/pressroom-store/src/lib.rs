//! Pressroom Store - immutable snapshot persistence
//!
//! Provides:
//! - `SnapshotBackend` capability trait (list / read / create-if-absent)
//! - Filesystem backend with atomic exclusive creates
//! - Object store backend over a pluggable `ObjectClient` (HTTP, in-memory)
//! - `SnapshotStore` with numeric latest-version resolution
//! - Store configuration and the startup-time backend selection

pub mod backend;
pub mod config;
pub mod deadline;
pub mod errors;
pub mod layout;
pub mod snapshot;

// Re-export key types
pub use backend::{CreateOutcome, SnapshotBackend};
pub use config::{open_store, BackendConfig, StoreConfig};
pub use deadline::Deadline;
pub use errors::Result;
pub use snapshot::{Snapshot, SnapshotStore};
