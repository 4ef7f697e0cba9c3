//! Publish command
//!
//! Usage: pressroom --role publisher publish --slug <SLUG> --draft <FILE> [--dry-run]

use crate::commands::{print_json, read_draft};
use clap::Args;
use pressroom_core::policy::PublishGate;
use pressroom_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use pressroom_engine::commands::publish::PublishOptions;
use pressroom_store::SnapshotStore;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Slug to publish under
    #[arg(long)]
    pub slug: String,

    /// Draft document (JSON)
    #[arg(long)]
    pub draft: PathBuf,

    /// Compute version and changelog without writing a snapshot
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute(
    args: PublishArgs,
    store: &SnapshotStore,
    gate: &dyn PublishGate,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = read_draft(&args.draft)?;

    let cmd = EngineCommand::Publish {
        slug: args.slug,
        document,
        options: PublishOptions {
            dry_run: args.dry_run,
        },
    };

    match apply_engine_command(cmd, store, gate)? {
        EngineCommandResult::Published(result) => print_json(&result),
        other => Err(format!("Unexpected engine result: {:?}", other).into()),
    }
}
