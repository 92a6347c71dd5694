use std::path::PathBuf;

use chal_types::EntityId;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chal",
    about = "Coding challenge store: create, inspect and edit stored challenges",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Store directory (overrides the config file)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// TOML store configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the store directory
    Init(InitArgs),
    /// Store a new challenge read from a JSON file
    Create(CreateArgs),
    /// Show a stored challenge
    Show(ShowArgs),
    /// Rename a stored challenge
    Rename(RenameArgs),
    /// Replace a stored challenge with the contents of a JSON file
    Update(UpdateArgs),
    /// Delete a stored challenge
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct InitArgs {
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct CreateArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: EntityId,
}

#[derive(Args)]
pub struct RenameArgs {
    pub id: EntityId,
    pub name: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub id: EntityId,
    pub file: PathBuf,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: EntityId,
}
