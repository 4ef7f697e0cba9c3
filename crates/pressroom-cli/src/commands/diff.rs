//! Diff preview command
//!
//! Usage: pressroom diff --slug <SLUG> --draft <FILE>

use crate::commands::{print_json, read_draft};
use clap::Args;
use pressroom_engine::commands::read_tools::diff_preview;
use pressroom_store::SnapshotStore;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    #[arg(long)]
    pub slug: String,

    /// Draft document (JSON)
    #[arg(long)]
    pub draft: PathBuf,
}

pub fn execute(args: DiffArgs, store: &SnapshotStore) -> Result<(), Box<dyn std::error::Error>> {
    let document = read_draft(&args.draft)?;
    print_json(&diff_preview(store, &args.slug, &document)?)
}
