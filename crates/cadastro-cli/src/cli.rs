//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{add, edit, list, remove, shell};

/// Create, list, edit and remove usuario records.
#[derive(Parser, Debug)]
#[command(name = "cadastro")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the records live. Flags win over environment, which wins over
/// the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "CADASTRO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Store URL: file:///path or a Firestore endpoint
    #[arg(long, global = true, env = "CADASTRO_STORE")]
    pub store: Option<String>,

    /// Firestore project id
    #[arg(long, global = true, env = "CADASTRO_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Firestore web API key
    #[arg(long, global = true, env = "CADASTRO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Collection holding the records
    #[arg(long, global = true, env = "CADASTRO_COLLECTION")]
    pub collection: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every record
    List(list::ListArgs),

    /// Register a new record
    Add(add::AddArgs),

    /// Change an existing record
    Edit(edit::EditArgs),

    /// Delete a record after confirmation
    Remove(remove::RemoveArgs),

    /// Interactive form
    Shell(shell::ShellArgs),
}
