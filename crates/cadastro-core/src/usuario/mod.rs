//! The usuario record and its form input.
//!
//! [`FormInput`] holds raw text as typed; [`FormInput::validate`] turns it into
//! [`UsuarioFields`], the only shape the store accepts.

mod contato;
mod input;
mod types;

pub use contato::Contato;
pub use input::FormInput;
pub use types::{Nome, Usuario, UsuarioFields};
