//! Interactive form shell.
//!
//! Reads one command per line from stdin and drives a [`FormView`] the way
//! the form and list screen would: typing into the three inputs, submitting,
//! picking a record to edit and confirming deletes.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use cadastro_core::{Field, FormMode, FormView, RecordId, SubmitOutcome};

use super::remove::{CONFIRM_PROMPT, is_yes};
use crate::config::Settings;
use crate::output;
use crate::store::CliCollection;

#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Start with an empty list instead of loading the collection
    #[arg(long)]
    pub no_load: bool,
}

const HELP: &str = "\
nome <valor>      set the name input
idade <valor>     set the age input
contato <valor>   set the e-mail or phone input
submit            register, or save the record being edited
edit <id>         load a record into the form
cancel            leave edit mode and clear the form
delete <id>       ask to delete a record
yes | no          answer a pending delete
list              show every record
reload            fetch the list again
show              show the form inputs
help              show this help
quit              leave the shell";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Set(Field, String),
    Submit,
    Edit(String),
    Cancel,
    Delete(String),
    Yes,
    No,
    List,
    Reload,
    Show,
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    /// Parse a line. Field values keep their spaces; only the single
    /// separator after the command word is dropped.
    pub(crate) fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_end_matches(['\n', '\r']);
        let (word, rest) = match line.trim_start().split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };

        let id_arg = |name: &str| {
            let id = rest.trim();
            if id.is_empty() {
                Err(format!("usage: {} <id>", name))
            } else {
                Ok(id.to_string())
            }
        };

        match word.to_lowercase().as_str() {
            "" => Ok(ShellCommand::Empty),
            "nome" => Ok(ShellCommand::Set(Field::Nome, rest.to_string())),
            "idade" => Ok(ShellCommand::Set(Field::Idade, rest.to_string())),
            "contato" => Ok(ShellCommand::Set(Field::Contato, rest.to_string())),
            "submit" | "cadastrar" | "salvar" => Ok(ShellCommand::Submit),
            "edit" | "editar" => id_arg("edit").map(ShellCommand::Edit),
            "cancel" | "cancelar" => Ok(ShellCommand::Cancel),
            "delete" | "excluir" => id_arg("delete").map(ShellCommand::Delete),
            "yes" | "y" | "s" | "sim" => Ok(ShellCommand::Yes),
            "no" | "n" | "nao" | "não" => Ok(ShellCommand::No),
            "list" | "ls" => Ok(ShellCommand::List),
            "reload" => Ok(ShellCommand::Reload),
            "show" => Ok(ShellCommand::Show),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}

pub async fn run(args: ShellArgs, settings: &Settings) -> Result<()> {
    let mut view = FormView::new(CliCollection::open(settings)?);

    if !args.no_load {
        match view.load().await {
            Ok(count) => output::success(&format!("{} registro(s) carregado(s)", count)),
            Err(e) => output::error(&format!("Failed to load records: {}", e)),
        }
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock();

    loop {
        prompt(&view)?;

        let mut line = String::new();
        if lines.read_line(&mut line).context("Failed to read input")? == 0 {
            // EOF
            println!();
            break;
        }

        if view.state().pending_delete.is_some() {
            answer_delete(&mut view, &line).await;
            continue;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(msg) => {
                output::error(&msg);
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }

        execute(&mut view, command).await;
    }

    Ok(())
}

fn prompt(view: &FormView<CliCollection>) -> Result<()> {
    let mut stdout = io::stdout();
    match (&view.state().pending_delete, view.mode()) {
        (Some(_), _) => write!(stdout, "{} [s/N] ", CONFIRM_PROMPT)?,
        (None, FormMode::Creating) => {
            write!(stdout, "[{}]> ", view.submit_label().green())?
        }
        (None, FormMode::Editing(id)) => {
            write!(stdout, "[{} {}]> ", view.submit_label().yellow(), id)?
        }
    }
    stdout.flush()?;
    Ok(())
}

/// Handle the answer to the delete confirmation. Nothing else runs until
/// the question is answered.
async fn answer_delete(view: &mut FormView<CliCollection>, line: &str) {
    let answer = line.trim();
    if answer.is_empty() || matches!(ShellCommand::parse(answer), Ok(ShellCommand::No)) {
        view.cancel_delete();
        output::success("Exclusão cancelada");
    } else if is_yes(answer) {
        match view.confirm_delete().await {
            Ok(Some(id)) => output::success(&format!("Excluído {}", id)),
            Ok(None) => {}
            Err(e) => {
                output::error(&e.to_string());
                view.cancel_delete();
            }
        }
    } else {
        output::error("Responda s ou n.");
    }
}

async fn execute(view: &mut FormView<CliCollection>, command: ShellCommand) {
    match command {
        ShellCommand::Set(Field::Nome, value) => view.set_nome(value),
        ShellCommand::Set(Field::Idade, value) => view.set_idade(value),
        ShellCommand::Set(Field::Contato, value) => view.set_contato(value),
        ShellCommand::Submit => submit(view).await,
        ShellCommand::Edit(id) => match RecordId::new(id) {
            Ok(id) => match view.select_for_edit(&id) {
                Ok(()) => show(view),
                Err(e) => output::error(&e.to_string()),
            },
            Err(e) => output::error(&e.to_string()),
        },
        ShellCommand::Cancel => view.cancel_edit(),
        ShellCommand::Delete(id) => match RecordId::new(id) {
            Ok(id) => {
                if let Err(e) = view.request_delete(&id) {
                    output::error(&e.to_string());
                }
            }
            Err(e) => output::error(&e.to_string()),
        },
        ShellCommand::Yes | ShellCommand::No => output::error("Nothing to confirm."),
        ShellCommand::List => list(view),
        ShellCommand::Reload => {
            if let Err(e) = view.load().await {
                output::error(&e.to_string());
            }
        }
        ShellCommand::Show => show(view),
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit | ShellCommand::Empty => {}
    }
}

async fn submit(view: &mut FormView<CliCollection>) {
    match view.submit().await {
        Ok(SubmitOutcome::Created(usuario)) => {
            output::success(&format!("Cadastrado {}", usuario.id))
        }
        Ok(SubmitOutcome::Updated(usuario)) => output::success(&format!("Salvo {}", usuario.id)),
        Err(e) => match e.as_validation() {
            Some(validation) => output::validation(validation),
            None => output::error(&e.to_string()),
        },
    }
}

fn list(view: &FormView<CliCollection>) {
    if view.records().is_empty() {
        println!("{}", "No records found.".dimmed());
        return;
    }
    for (i, usuario) in view.records().iter().enumerate() {
        if i > 0 {
            println!();
        }
        output::card(usuario);
    }
}

/// Print the inputs, marking fields that failed the last submit.
fn show(view: &FormView<CliCollection>) {
    let state = view.state();
    for (field, value) in [
        (Field::Nome, &state.input.nome),
        (Field::Idade, &state.input.idade),
        (Field::Contato, &state.input.contato),
    ] {
        if state.errors.get(field) {
            output::field(field.label(), &format!("{} {}", value, "✗".red()));
        } else {
            output::field(field.label(), value);
        }
    }
    if let Some(message) = state.errors.message {
        output::error(message);
    }
    if let Some(last_error) = &state.last_error {
        output::error(last_error);
    }
}
