//! Engine-level commands that require store I/O.

use crate::commands::publish::{publish, PublishOptions, PublishResult};
use crate::commands::read_tools::{self, DiffPreview, History};
use pressroom_core::errors::Result;
use pressroom_core::model::{Document, Version};
use pressroom_core::policy::PublishGate;
use pressroom_store::{Snapshot, SnapshotStore};

/// Engine-level commands.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Publish a candidate document.
    Publish {
        slug: String,
        document: Document,
        options: PublishOptions,
    },
    /// Read the latest snapshot.
    Latest { slug: String },
    /// Read one historical snapshot.
    Show { slug: String, version: Version },
    /// List stored versions.
    History { slug: String },
    /// Preview what publishing a candidate would change.
    Diff { slug: String, document: Document },
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Published(PublishResult),
    Snapshot(Box<Snapshot>),
    History(History),
    Diff(DiffPreview),
}

/// Apply an engine command against a store. Only `Publish` consults `gate`.
///
/// # Errors
///
/// Propagates the error of the underlying operation unchanged.
pub fn apply_engine_command(
    cmd: EngineCommand,
    store: &SnapshotStore,
    gate: &dyn PublishGate,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Publish {
            slug,
            document,
            options,
        } => publish(store, gate, &slug, &document, options).map(EngineCommandResult::Published),
        EngineCommand::Latest { slug } => read_tools::latest(store, &slug)
            .map(|s| EngineCommandResult::Snapshot(Box::new(s))),
        EngineCommand::Show { slug, version } => read_tools::show(store, &slug, &version)
            .map(|s| EngineCommandResult::Snapshot(Box::new(s))),
        EngineCommand::History { slug } => {
            read_tools::history(store, &slug).map(EngineCommandResult::History)
        }
        EngineCommand::Diff { slug, document } => {
            read_tools::diff_preview(store, &slug, &document).map(EngineCommandResult::Diff)
        }
    }
}
