//! File-backed collection implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use cadastro_core::traits::Collection;
use cadastro_core::types::{CollectionName, RecordId};
use cadastro_core::usuario::{Usuario, UsuarioFields};
use cadastro_core::Result;

use crate::store::FileStore;

/// A collection stored as a directory of JSON documents.
#[derive(Debug, Clone)]
pub struct FileCollection {
    store: FileStore,
    name: CollectionName,
}

impl FileCollection {
    pub(crate) fn new(store: FileStore, name: CollectionName) -> Self {
        Self { store, name }
    }
}

#[async_trait]
impl Collection for FileCollection {
    fn name(&self) -> &CollectionName {
        &self.name
    }

    #[instrument(skip(self), fields(collection = %self.name))]
    async fn list_all(&self) -> Result<Vec<Usuario>> {
        debug!("Listing documents");
        self.store.list_documents(&self.name).await
    }

    #[instrument(skip(self, fields), fields(collection = %self.name))]
    async fn insert(&self, fields: &UsuarioFields) -> Result<Usuario> {
        debug!("Inserting document");
        self.store.insert_document(&self.name, fields).await
    }

    #[instrument(skip(self, fields), fields(collection = %self.name, %id))]
    async fn update(&self, id: &RecordId, fields: &UsuarioFields) -> Result<()> {
        debug!("Updating document");
        self.store.update_document(&self.name, id, fields).await
    }

    #[instrument(skip(self), fields(collection = %self.name, %id))]
    async fn remove(&self, id: &RecordId) -> Result<()> {
        debug!("Removing document");
        self.store.delete_document(&self.name, id).await
    }
}
