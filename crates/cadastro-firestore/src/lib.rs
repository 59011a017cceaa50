//! cadastro-firestore - Firestore REST-backed document store.

mod client;
mod collection;
mod config;
mod database;
mod document;

pub use collection::FirestoreCollection;
pub use config::{ApiKey, FirestoreConfig};
pub use database::FirestoreDatabase;
