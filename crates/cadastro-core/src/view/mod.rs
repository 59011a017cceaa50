//! Form and list view.
//!
//! [`FormView`] is the single writer of the local record list. It validates
//! input, calls the collection, and reconciles its [`ViewState`] with each
//! result.

mod form;
mod state;

pub use form::{FormView, SubmitOutcome};
pub use state::{FieldErrors, FormMode, ViewState};
