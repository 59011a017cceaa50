//! Collection wrapper for CLI use.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use cadastro_core::traits::{Collection, Database};
use cadastro_core::types::{CollectionName, RecordId};
use cadastro_core::usuario::{Usuario, UsuarioFields};
use cadastro_file::{FileCollection, FileDatabase};
use cadastro_firestore::{FirestoreCollection, FirestoreDatabase};

use crate::config::Settings;

/// The collection chosen by the store URL.
#[derive(Debug)]
pub enum CliCollection {
    File(FileCollection),
    Firestore(FirestoreCollection),
}

impl CliCollection {
    /// Open the configured collection.
    pub fn open(settings: &Settings) -> Result<Self> {
        debug!(store = %settings.store, collection = %settings.collection, "Opening collection");

        match &settings.firestore {
            Some(config) => {
                let database = FirestoreDatabase::new(config.clone())
                    .context("Failed to create Firestore client")?;
                debug!(
                    url = %database.url(),
                    project = %database.config().project_id,
                    "Using Firestore"
                );
                Ok(CliCollection::Firestore(
                    database.collection(&settings.collection),
                ))
            }
            None => {
                let database = FileDatabase::from_url(settings.store.clone())
                    .context("Failed to convert file:// URL to path")?;
                debug!(root = %database.store().root().display(), "Using file store");
                Ok(CliCollection::File(database.collection(&settings.collection)))
            }
        }
    }
}

#[async_trait]
impl Collection for CliCollection {
    fn name(&self) -> &CollectionName {
        match self {
            CliCollection::File(collection) => collection.name(),
            CliCollection::Firestore(collection) => collection.name(),
        }
    }

    async fn list_all(&self) -> cadastro_core::Result<Vec<Usuario>> {
        match self {
            CliCollection::File(collection) => collection.list_all().await,
            CliCollection::Firestore(collection) => collection.list_all().await,
        }
    }

    async fn insert(&self, fields: &UsuarioFields) -> cadastro_core::Result<Usuario> {
        match self {
            CliCollection::File(collection) => collection.insert(fields).await,
            CliCollection::Firestore(collection) => collection.insert(fields).await,
        }
    }

    async fn update(&self, id: &RecordId, fields: &UsuarioFields) -> cadastro_core::Result<()> {
        match self {
            CliCollection::File(collection) => collection.update(id, fields).await,
            CliCollection::Firestore(collection) => collection.update(id, fields).await,
        }
    }

    async fn remove(&self, id: &RecordId) -> cadastro_core::Result<()> {
        match self {
            CliCollection::File(collection) => collection.remove(id).await,
            CliCollection::Firestore(collection) => collection.remove(id).await,
        }
    }
}
