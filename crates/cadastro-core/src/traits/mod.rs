//! Core traits for store connections and collections.

mod collection;
mod database;

pub use collection::Collection;
pub use database::Database;
