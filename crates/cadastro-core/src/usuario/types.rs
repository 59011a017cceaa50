//! Record types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Contato, FormInput};
use crate::error::{Field, FieldIssue, ValidationError};
use crate::types::RecordId;

/// A non-empty person name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nome(String);

impl Nome {
    /// Create a name, rejecting the empty string.
    pub fn new(s: impl Into<String>) -> Result<Self, FieldIssue> {
        let s = s.into();
        if s.is_empty() {
            return Err(FieldIssue::Missing(Field::Nome));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Nome {
    type Error = FieldIssue;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Nome> for String {
    fn from(nome: Nome) -> Self {
        nome.0
    }
}

/// The validated fields of a usuario, without its id.
///
/// This is what gets written on insert and update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsuarioFields {
    pub nome: Nome,
    pub idade: u32,
    pub contato: Contato,
}

/// A usuario record as found in the store.
///
/// Stored values are kept as they are, even when they break the form
/// rules: other writers may have saved them, and the record still has to
/// be listed, fixed or deleted. Use [`fields`](Self::fields) to check them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usuario {
    /// Store-assigned identifier.
    pub id: RecordId,
    #[serde(default)]
    pub nome: String,
    /// `None` when the stored value is not a whole number of years.
    #[serde(default)]
    pub idade: Option<u32>,
    #[serde(default)]
    pub contato: String,
}

impl Usuario {
    /// Attach an id to a set of fields.
    pub fn from_parts(id: RecordId, fields: UsuarioFields) -> Self {
        Self {
            id,
            nome: fields.nome.into(),
            idade: Some(fields.idade),
            contato: fields.contato.into(),
        }
    }

    /// Run the stored values through the form rules.
    pub fn fields(&self) -> Result<UsuarioFields, ValidationError> {
        FormInput::from_usuario(self).validate()
    }

    /// Returns true if the stored values pass the form rules.
    pub fn is_valid(&self) -> bool {
        self.fields().is_ok()
    }
}
