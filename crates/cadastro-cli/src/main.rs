//! cadastro - create, list, edit and remove usuario records.
//!
//! A terminal front end over `cadastro-core`: one-shot commands for each
//! operation plus an interactive form shell.

mod cli;
mod commands;
mod config;
mod output;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{add, edit, list, remove, shell};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let settings = config::Settings::resolve(&cli.store)?;

    match cli.command {
        Commands::List(args) => list::run(args, &settings).await,
        Commands::Add(args) => add::run(args, &settings).await,
        Commands::Edit(args) => edit::run(args, &settings).await,
        Commands::Remove(args) => remove::run(args, &settings).await,
        Commands::Shell(args) => shell::run(args, &settings).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so command output stays clean on stdout.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
