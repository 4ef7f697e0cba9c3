//! Snapshot read commands: latest, show, history

use crate::commands::print_json;
use clap::Args;
use pressroom_core::model::Version;
use pressroom_engine::commands::read_tools;
use pressroom_store::SnapshotStore;

#[derive(Debug, Args)]
pub struct LatestArgs {
    #[arg(long)]
    pub slug: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(long)]
    pub slug: String,

    /// Version to show (major.minor.patch)
    #[arg(long)]
    pub version: String,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(long)]
    pub slug: String,
}

pub fn execute_latest(
    args: LatestArgs,
    store: &SnapshotStore,
) -> Result<(), Box<dyn std::error::Error>> {
    print_json(&read_tools::latest(store, &args.slug)?)
}

pub fn execute_show(args: ShowArgs, store: &SnapshotStore) -> Result<(), Box<dyn std::error::Error>> {
    let version: Version = args.version.parse()?;
    print_json(&read_tools::show(store, &args.slug, &version)?)
}

pub fn execute_history(
    args: HistoryArgs,
    store: &SnapshotStore,
) -> Result<(), Box<dyn std::error::Error>> {
    print_json(&read_tools::history(store, &args.slug)?)
}
