//! Edit command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cadastro_core::{RecordId, SubmitOutcome};

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Id of the record to change
    pub id: String,

    /// New name
    #[arg(long)]
    pub nome: Option<String>,

    /// New age
    #[arg(long, allow_hyphen_values = true)]
    pub idade: Option<String>,

    /// New e-mail address or phone number
    #[arg(long)]
    pub contato: Option<String>,
}

pub async fn run(args: EditArgs, settings: &Settings) -> Result<()> {
    let id = RecordId::new(&args.id).context("Invalid record id")?;

    let mut view = super::load_view(settings).await?;
    view.select_for_edit(&id)
        .with_context(|| format!("Record {} not found", id))?;

    if let Some(nome) = args.nome {
        view.set_nome(nome);
    }
    if let Some(idade) = args.idade {
        view.set_idade(idade);
    }
    if let Some(contato) = args.contato {
        view.set_contato(contato);
    }

    let outcome = view.submit().await.map_err(super::submit_failed)?;

    if let SubmitOutcome::Updated(usuario) = outcome {
        output::success(&format!("Salvo {}", usuario.id));
        output::card(&usuario);
    }

    Ok(())
}
