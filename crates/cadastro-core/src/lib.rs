//! cadastro-core - Core types, validation and form state for cadastro.

pub mod error;
pub mod traits;
pub mod types;
pub mod usuario;
pub mod view;

pub use error::{
    Error, Field, FieldIssue, InvalidInputError, RejectedError, StoreError, TransportError,
    ValidationError,
};
pub use traits::{Collection, Database};
pub use types::{CollectionName, RecordId, StoreUrl};
pub use usuario::{Contato, FormInput, Nome, Usuario, UsuarioFields};
pub use view::{FieldErrors, FormMode, FormView, SubmitOutcome, ViewState};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
