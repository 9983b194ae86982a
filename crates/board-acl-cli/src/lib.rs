//! # board-acl-cli
//!
//! Command-line access to the board permission evaluator.
//!
//! Loads a directory snapshot (resources, ACL entries, groups) from TOML and
//! answers ownership and permission questions against it:
//!
//! ```text
//! board-acl --snapshot boards.toml owner --actor alice --resource 1
//! board-acl --snapshot boards.toml check --actor alice --resource 1 --permission read
//! board-acl --snapshot boards.toml permissions --actor alice --resource 1
//! ```

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use board_acl::{AccessEvaluator, ActorId, MemoryDirectory, PermissionKind, ResourceId, Snapshot};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Board permission inspector
#[derive(Parser, Debug)]
#[command(name = "board-acl")]
#[command(author, version, about = "Inspect board ownership and permissions", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "BOARD_ACL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Snapshot of resources, ACL entries and groups
    #[arg(short, long, env = "BOARD_ACL_SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Is the actor the owner of the resource?
    Owner {
        /// Acting identity
        #[arg(long)]
        actor: String,
        /// Resource id
        #[arg(long)]
        resource: String,
    },
    /// Does the actor hold one permission on the resource?
    Check {
        /// Acting identity
        #[arg(long)]
        actor: String,
        /// Resource id
        #[arg(long)]
        resource: String,
        /// read, edit, manage or share
        #[arg(long)]
        permission: PermissionKind,
    },
    /// Report all four permissions as JSON
    Permissions {
        /// Acting identity
        #[arg(long)]
        actor: String,
        /// Resource id
        #[arg(long)]
        resource: String,
    },
}

/// Install the fmt subscriber. `log` records from the library are bridged
/// through tracing.
///
/// Filter precedence: `RUST_LOG`, then `--verbose`, then the config file.
pub fn init_logging(verbose: bool, config: &CliConfig) {
    let fallback = if verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build the evaluator described by the configuration and snapshot.
pub fn build_evaluator(config: &CliConfig, snapshot: Snapshot) -> AccessEvaluator {
    let directory = Arc::new(MemoryDirectory::from_snapshot(snapshot));
    AccessEvaluator::from_directory(directory).with_config(config.evaluator.clone())
}

/// Run a command and return what should be printed.
pub fn execute(evaluator: &AccessEvaluator, command: &Command) -> Result<String> {
    match command {
        Command::Owner { actor, resource } => {
            let owner = evaluator.is_owner(
                &ActorId::from(actor.as_str()),
                &ResourceId::from(resource.as_str()),
            )?;
            Ok(owner.to_string())
        }
        Command::Check {
            actor,
            resource,
            permission,
        } => {
            let granted = evaluator.evaluate(
                &ActorId::from(actor.as_str()),
                &ResourceId::from(resource.as_str()),
                *permission,
            )?;
            tracing::info!(%actor, %resource, %permission, granted, "permission check");
            Ok(granted.to_string())
        }
        Command::Permissions { actor, resource } => {
            let map = evaluator.evaluate_all(
                &ActorId::from(actor.as_str()),
                &ResourceId::from(resource.as_str()),
            )?;
            serde_json::to_string_pretty(&map).context("Failed to render permissions")
        }
    }
}

/// Load configuration and snapshot, then run the requested command.
pub fn run(args: &Args) -> Result<String> {
    let config = CliConfig::load(args.config.as_deref())?;
    init_logging(args.verbose, &config);

    let snapshot = Snapshot::load(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;
    let evaluator = build_evaluator(&config, snapshot);
    log::debug!("Using {evaluator:?}");

    execute(&evaluator, &args.command)
}
