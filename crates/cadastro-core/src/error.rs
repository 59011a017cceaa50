//! Error types for cadastro.
//!
//! A single error type with explicit variants for store failures, form
//! validation failures and malformed identifiers or configuration.

use std::fmt;
use thiserror::Error;

/// The unified error type for cadastro operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A read or write against the document store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Form input broke one or more field rules.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Input validation errors (record id, collection name, store URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this error came from the document store.
    pub fn is_store(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Returns the validation details, if this is a validation failure.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Error::Store(StoreError::Transport(err))
    }
}

impl From<RejectedError> for Error {
    fn from(err: RejectedError) -> Self {
        Error::Store(StoreError::Rejected(err))
    }
}

/// Failure of a remote read or write.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The store answered and refused the operation.
    #[error("rejected: {0}")]
    Rejected(#[from] RejectedError),

    /// The store answered with something that could not be decoded.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Local filesystem error.
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io {
            message: err.to_string(),
        }
    }
}

/// A refusal reported by the store.
#[derive(Debug)]
pub struct RejectedError {
    /// HTTP status code (or the equivalent for non-HTTP stores).
    pub status: u16,
    /// Store status code, e.g. `NOT_FOUND`.
    pub code: Option<String>,
    /// Error message from the store.
    pub message: Option<String>,
}

impl fmt::Display for RejectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for RejectedError {}

impl RejectedError {
    /// Create a new rejection.
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// A 404 rejection for a missing document.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, Some("NOT_FOUND".to_string()), Some(message.into()))
    }

    /// Check if the target document does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == 404 || self.code.as_deref() == Some("NOT_FOUND")
    }
}

/// A form field subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Nome,
    Idade,
    Contato,
}

impl Field {
    /// The label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::Nome => "Nome",
            Field::Idade => "Idade",
            Field::Contato => "E-mail ou Celular",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single broken field rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldIssue {
    /// The field was left empty.
    #[error("{0} é obrigatório")]
    Missing(Field),

    /// Idade is not a non-negative integer.
    #[error("idade inválida '{0}'")]
    InvalidIdade(String),

    /// Contato is neither an email address nor a 10-11 digit phone number.
    #[error("e-mail ou número de celular inválido '{0}'")]
    InvalidContato(String),
}

impl FieldIssue {
    /// The field this issue belongs to.
    pub fn field(&self) -> Field {
        match self {
            FieldIssue::Missing(field) => *field,
            FieldIssue::InvalidIdade(_) => Field::Idade,
            FieldIssue::InvalidContato(_) => Field::Contato,
        }
    }
}

/// Every rule broken by a form submission.
///
/// Never empty: constructing one without issues is a bug in the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub(crate) fn new(issues: Vec<FieldIssue>) -> Self {
        debug_assert!(!issues.is_empty());
        Self { issues }
    }

    /// The individual issues, in field order.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Returns true if `field` has at least one issue.
    pub fn has(&self, field: Field) -> bool {
        self.issues.iter().any(|issue| issue.field() == field)
    }

    /// The user-facing summary line.
    pub fn summary(&self) -> &'static str {
        if self
            .issues
            .iter()
            .any(|issue| matches!(issue, FieldIssue::Missing(_)))
        {
            "Por favor, preencha todos os campos."
        } else if self.has(Field::Contato) {
            "Por favor, insira um e-mail ou número de celular válido."
        } else {
            "Por favor, insira uma idade válida."
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for issue in &self.issues {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", issue)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid record id.
    #[error("invalid record id '{value}': {reason}")]
    RecordId { value: String, reason: String },

    /// Invalid collection name.
    #[error("invalid collection name '{value}': {reason}")]
    CollectionName { value: String, reason: String },

    /// Invalid store URL.
    #[error("invalid store URL '{value}': {reason}")]
    StoreUrl { value: String, reason: String },

    /// No record with this id in the local list.
    #[error("no record with id '{id}'")]
    UnknownRecord { id: String },

    /// A connection setting that cannot be used, e.g. an empty project id.
    #[error("invalid {setting}: {reason}")]
    Setting {
        setting: &'static str,
        reason: String,
    },
}
