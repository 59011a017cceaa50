//! The form/list state machine.

use tracing::{debug, error, info, instrument};

use super::state::{FieldErrors, FormMode, ViewState};
use crate::error::{Error, InvalidInputError};
use crate::traits::Collection;
use crate::types::RecordId;
use crate::usuario::{FormInput, Usuario};
use crate::Result;

/// What a successful submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new record was inserted and appended to the list.
    Created(Usuario),
    /// An existing record was saved and replaced in the list.
    Updated(Usuario),
}

/// Form and list view over one collection.
///
/// Every operation takes `&mut self`, so a submit cannot start while
/// another call is still in flight.
#[derive(Debug)]
pub struct FormView<C> {
    collection: C,
    state: ViewState,
}

impl<C: Collection> FormView<C> {
    /// Create an empty view. Call [`load`](Self::load) to fill the list.
    pub fn new(collection: C) -> Self {
        Self {
            collection,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn records(&self) -> &[Usuario] {
        &self.state.records
    }

    pub fn mode(&self) -> &FormMode {
        &self.state.mode
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    pub fn submit_label(&self) -> &'static str {
        self.state.mode.submit_label()
    }

    pub fn set_nome(&mut self, value: impl Into<String>) {
        self.state.input.nome = value.into();
    }

    pub fn set_idade(&mut self, value: impl Into<String>) {
        self.state.input.idade = value.into();
    }

    pub fn set_contato(&mut self, value: impl Into<String>) {
        self.state.input.contato = value.into();
    }

    /// Replace all three inputs at once.
    pub fn set_input(&mut self, input: FormInput) {
        self.state.input = input;
    }

    /// Fetch the collection and replace the local list.
    #[instrument(skip(self), fields(collection = %self.collection.name()))]
    pub async fn load(&mut self) -> Result<usize> {
        let records = self
            .collection
            .list_all()
            .await
            .map_err(|e| self.store_failed("load", e))?;

        info!(count = records.len(), "Loaded records");
        self.state.records = records;
        self.state.last_error = None;
        Ok(self.state.records.len())
    }

    /// Validate the form and create or save depending on the mode.
    ///
    /// On validation failure the error flags are set, the inputs are kept
    /// and no store call is made.
    #[instrument(skip(self), fields(collection = %self.collection.name(), mode = ?self.state.mode))]
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let fields = match self.state.input.validate() {
            Ok(fields) => fields,
            Err(err) => {
                debug!(%err, "Submit blocked by validation");
                self.state.errors = FieldErrors::from_validation(&err);
                return Err(err.into());
            }
        };
        self.state.errors = FieldErrors::default();

        let outcome = match self.state.mode.clone() {
            FormMode::Creating => {
                let usuario = self
                    .collection
                    .insert(&fields)
                    .await
                    .map_err(|e| self.store_failed("insert", e))?;

                self.state.records.push(usuario.clone());
                SubmitOutcome::Created(usuario)
            }
            FormMode::Editing(id) => {
                self.collection
                    .update(&id, &fields)
                    .await
                    .map_err(|e| self.store_failed("update", e))?;

                let usuario = Usuario::from_parts(id, fields);
                if let Some(slot) = self.state.records.iter_mut().find(|r| r.id == usuario.id) {
                    *slot = usuario.clone();
                }
                self.state.mode = FormMode::Creating;
                SubmitOutcome::Updated(usuario)
            }
        };

        self.state.clear_form();
        self.state.last_error = None;
        Ok(outcome)
    }

    /// Load a record into the form and switch to editing it.
    pub fn select_for_edit(&mut self, id: &RecordId) -> Result<()> {
        let input = FormInput::from_usuario(self.state.record(id).ok_or_else(|| unknown(id))?);
        self.state.input = input;
        self.state.errors = FieldErrors::default();
        self.state.mode = FormMode::Editing(id.clone());
        debug!(%id, "Editing record");
        Ok(())
    }

    /// Drop the edit target and clear the form.
    pub fn cancel_edit(&mut self) {
        self.state.clear_form();
        self.state.mode = FormMode::Creating;
    }

    /// Ask for confirmation before deleting `id`. Nothing is removed yet.
    pub fn request_delete(&mut self, id: &RecordId) -> Result<()> {
        if self.state.record(id).is_none() {
            return Err(unknown(id));
        }
        self.state.pending_delete = Some(id.clone());
        Ok(())
    }

    /// Delete the pending record.
    ///
    /// Returns the removed id, or `None` if nothing was pending. On failure
    /// the record stays in the list and stays pending.
    #[instrument(skip(self), fields(collection = %self.collection.name()))]
    pub async fn confirm_delete(&mut self) -> Result<Option<RecordId>> {
        let Some(id) = self.state.pending_delete.clone() else {
            return Ok(None);
        };

        self.collection
            .remove(&id)
            .await
            .map_err(|e| self.store_failed("remove", e))?;

        self.state.records.retain(|r| r.id != id);
        self.state.pending_delete = None;
        if self.state.mode.editing_id() == Some(&id) {
            self.cancel_edit();
        }
        self.state.last_error = None;
        Ok(Some(id))
    }

    /// Forget the pending delete without touching the store.
    pub fn cancel_delete(&mut self) {
        self.state.pending_delete = None;
    }

    fn store_failed(&mut self, op: &str, err: Error) -> Error {
        error!(op, error = %err, "Store operation failed");
        self.state.last_error = Some(err.to_string());
        err
    }
}

fn unknown(id: &RecordId) -> Error {
    InvalidInputError::UnknownRecord {
        id: id.to_string(),
    }
    .into()
}
