//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use cadastro_core::{Usuario, ValidationError};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a record as a card.
pub fn card(usuario: &Usuario) {
    field("ID", usuario.id.as_str());
    field("Nome", &usuario.nome);
    match usuario.idade {
        Some(idade) => field("Idade", &idade.to_string()),
        None => field("Idade", "(inválida)"),
    }
    field("Contato", &usuario.contato);
}

/// Print a blocked submission: the summary line, then each broken rule.
pub fn validation(err: &ValidationError) {
    error(err.summary());
    for issue in err.issues() {
        eprintln!("  {} {}", "-".dimmed(), issue);
    }
}
