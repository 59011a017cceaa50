//! Remove command implementation.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;

use cadastro_core::RecordId;

use crate::config::Settings;
use crate::output;

/// The confirmation question shown before deleting.
pub(crate) const CONFIRM_PROMPT: &str = "Você realmente deseja excluir este item?";

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Id of the record to delete
    pub id: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

/// Returns true for an affirmative answer.
pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}

pub async fn run(args: RemoveArgs, settings: &Settings) -> Result<()> {
    let id = RecordId::new(&args.id).context("Invalid record id")?;

    let mut view = super::load_view(settings).await?;
    view.request_delete(&id)
        .with_context(|| format!("Record {} not found", id))?;

    // Confirm unless --force
    if !args.force {
        eprint!("{} [s/N] ", CONFIRM_PROMPT);
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !is_yes(&input) {
            view.cancel_delete();
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    view.confirm_delete()
        .await
        .context("Failed to delete record")?;

    output::success(&format!("Excluído {}", id));

    Ok(())
}
