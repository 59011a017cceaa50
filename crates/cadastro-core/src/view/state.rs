//! Explicit view state.

use crate::error::{Field, ValidationError};
use crate::types::RecordId;
use crate::usuario::{FormInput, Usuario};

/// Whether a submit creates a new record or saves an existing one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(RecordId),
}

impl FormMode {
    /// Label for the submit action.
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Creating => "Cadastrar",
            FormMode::Editing(_) => "Salvar",
        }
    }

    /// The record being edited, if any.
    pub fn editing_id(&self) -> Option<&RecordId> {
        match self {
            FormMode::Creating => None,
            FormMode::Editing(id) => Some(id),
        }
    }
}

/// Per-field error flags plus the summary shown under the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub nome: bool,
    pub idade: bool,
    pub contato: bool,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn from_validation(err: &ValidationError) -> Self {
        Self {
            nome: err.has(Field::Nome),
            idade: err.has(Field::Idade),
            contato: err.has(Field::Contato),
            message: Some(err.summary()),
        }
    }

    /// Returns true if any field is flagged.
    pub fn any(&self) -> bool {
        self.nome || self.idade || self.contato
    }

    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::Nome => self.nome,
            Field::Idade => self.idade,
            Field::Contato => self.contato,
        }
    }
}

/// Everything the view shows, in one place.
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    /// Form inputs as typed.
    pub input: FormInput,
    pub mode: FormMode,
    pub errors: FieldErrors,
    /// Record awaiting delete confirmation.
    pub pending_delete: Option<RecordId>,
    /// Local mirror of the collection as of the last successful call.
    pub records: Vec<Usuario>,
    /// The most recent store failure, shown until the next success.
    pub last_error: Option<String>,
}

impl ViewState {
    /// Look up a record in the local list.
    pub fn record(&self, id: &RecordId) -> Option<&Usuario> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Clear inputs and error flags. Mode and pending delete are untouched.
    pub(crate) fn clear_form(&mut self) {
        self.input.clear();
        self.errors = FieldErrors::default();
    }
}
