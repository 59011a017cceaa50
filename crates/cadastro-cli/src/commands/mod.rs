//! Subcommand implementations.

pub mod add;
pub mod edit;
pub mod list;
pub mod remove;
pub mod shell;

use anyhow::{Context, Result, anyhow};

use cadastro_core::{Error, FormView};

use crate::config::Settings;
use crate::output;
use crate::store::CliCollection;

/// Open the configured collection and load its records into a view.
pub(crate) async fn load_view(settings: &Settings) -> Result<FormView<CliCollection>> {
    let collection = CliCollection::open(settings)?;
    let mut view = FormView::new(collection);
    view.load().await.context("Failed to load records")?;
    Ok(view)
}

/// Turn a failed submit into a command error, showing field problems first.
pub(crate) fn submit_failed(err: Error) -> anyhow::Error {
    match err.as_validation() {
        Some(validation) => {
            output::validation(validation);
            anyhow!("Submission blocked")
        }
        None => anyhow::Error::new(err).context("Failed to save record"),
    }
}
