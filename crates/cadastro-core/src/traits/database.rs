//! Database connector trait.

use crate::types::{CollectionName, StoreUrl};

use super::Collection;

/// An open handle to a document database.
///
/// Opening is pure configuration; no request is made until a
/// collection operation runs.
pub trait Database: Send + Sync {
    /// Collection handle type for this database.
    type Collection: Collection;

    /// Returns the store URL for this instance.
    fn url(&self) -> &StoreUrl;

    /// Bind a handle to the named collection.
    fn collection(&self, name: &CollectionName) -> Self::Collection;
}
