//! Record store adapter trait.

use async_trait::async_trait;

use crate::Result;
use crate::types::{CollectionName, RecordId};
use crate::usuario::{Usuario, UsuarioFields};

/// The four operations against a single named collection.
///
/// Calls are not retried. A failure leaves the remote side in whatever
/// state the store reached; callers must not assume the write was
/// rolled back.
#[async_trait]
pub trait Collection: Send + Sync {
    /// Returns the name of this collection.
    fn name(&self) -> &CollectionName;

    /// Fetch every record in the collection, in no particular order.
    async fn list_all(&self) -> Result<Vec<Usuario>>;

    /// Create a record and return it with its store-assigned id.
    async fn insert(&self, fields: &UsuarioFields) -> Result<Usuario>;

    /// Overwrite all fields of an existing record.
    ///
    /// Fails if no record with `id` exists.
    async fn update(&self, id: &RecordId, fields: &UsuarioFields) -> Result<()>;

    /// Delete a record. Deleting a missing record succeeds.
    async fn remove(&self, id: &RecordId) -> Result<()>;
}
