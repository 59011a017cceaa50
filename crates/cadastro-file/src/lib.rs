//! cadastro-file - Filesystem-backed document store.
//!
//! Each collection is a directory and each record a JSON file, so a
//! `file://` store URL gives the whole tool a local backend with no
//! hosted project.

mod collection;
mod database;
mod store;

pub use collection::FileCollection;
pub use database::FileDatabase;
pub use store::FileStore;
