//! Pressroom CLI
//!
//! Command-line interface for publishing documents and reading snapshots

use clap::{Parser, Subcommand};
use pressroom_core::logging_facility::{self, Profile};
use pressroom_core::policy::{DenyAllGate, PublishGate, Role, RoleGate};
use pressroom_store::{open_store, StoreConfig};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "pressroom")]
#[command(about = "Pressroom - versioned document publishing", long_about = None)]
struct Cli {
    /// Store configuration file (TOML); PRESSROOM_* variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Caller role as established by upstream authentication
    /// (viewer, editor, publisher). Publishing is denied without one.
    #[arg(long, global = true)]
    role: Option<String>,

    /// Logging profile (dev, prod, test); logs go to stderr
    #[arg(long, global = true, default_value = "prod")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Publish a draft document
    Publish(commands::publish::PublishArgs),
    /// Show the latest snapshot of a slug
    Latest(commands::snapshot::LatestArgs),
    /// Show one historical snapshot
    Show(commands::snapshot::ShowArgs),
    /// List the published versions of a slug
    History(commands::snapshot::HistoryArgs),
    /// Preview the changes a draft would publish
    Diff(commands::diff::DiffArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    logging_facility::init(cli.log.parse::<Profile>()?);

    let config = StoreConfig::load(cli.config.as_deref())?;
    let store = open_store(&config)?;

    let gate: Box<dyn PublishGate> = match cli.role {
        Some(role) => Box::new(RoleGate::new(role.parse::<Role>()?)),
        None => Box::new(DenyAllGate),
    };

    match cli.command {
        Commands::Publish(args) => commands::publish::execute(args, &store, gate.as_ref()),
        Commands::Latest(args) => commands::snapshot::execute_latest(args, &store),
        Commands::Show(args) => commands::snapshot::execute_show(args, &store),
        Commands::History(args) => commands::snapshot::execute_history(args, &store),
        Commands::Diff(args) => commands::diff::execute(args, &store),
    }
}

fn main() {
    // A missing .env is normal
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
