//! List command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print one JSON object per record
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, requires = "json")]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, settings: &Settings) -> Result<()> {
    let view = super::load_view(settings).await?;

    if view.records().is_empty() {
        eprintln!("{}", "No records found.".dimmed());
        return Ok(());
    }

    for (i, usuario) in view.records().iter().enumerate() {
        if args.json {
            if args.pretty {
                output::json_pretty(usuario)?;
            } else {
                output::json(usuario)?;
            }
        } else {
            if i > 0 {
                println!();
            }
            output::card(usuario);
        }
    }

    Ok(())
}
