//! Add command implementation.

use anyhow::Result;
use clap::Args;

use cadastro_core::{FormInput, FormView, SubmitOutcome};

use crate::config::Settings;
use crate::output;
use crate::store::CliCollection;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Full name
    #[arg(long)]
    pub nome: String,

    /// Age in whole years
    #[arg(long, allow_hyphen_values = true)]
    pub idade: String,

    /// E-mail address or 10-11 digit phone number
    #[arg(long)]
    pub contato: String,
}

pub async fn run(args: AddArgs, settings: &Settings) -> Result<()> {
    // A new record needs no listing first.
    let mut view = FormView::new(CliCollection::open(settings)?);
    view.set_input(FormInput::new(args.nome, args.idade, args.contato));

    let outcome = view.submit().await.map_err(super::submit_failed)?;

    if let SubmitOutcome::Created(usuario) = outcome {
        output::success(&format!("Cadastrado {}", usuario.id));
        output::card(&usuario);
    }

    Ok(())
}
