//! Firestore-backed collection implementation.

use async_trait::async_trait;
use serde::de::IgnoredAny;
use tracing::{debug, instrument, warn};

use cadastro_core::Result;
use cadastro_core::error::StoreError;
use cadastro_core::traits::Collection;
use cadastro_core::types::{CollectionName, RecordId};
use cadastro_core::usuario::{Usuario, UsuarioFields};

use crate::client::FirestoreClient;
use crate::document::{Document, FIELD_PATHS, ListDocumentsResponse, WriteDocument};

/// Documents requested per list page.
const PAGE_SIZE: &str = "300";

/// A collection in a Firestore database.
#[derive(Debug, Clone)]
pub struct FirestoreCollection {
    client: FirestoreClient,
    name: CollectionName,
}

impl FirestoreCollection {
    pub(crate) fn new(client: FirestoreClient, name: CollectionName) -> Self {
        Self { client, name }
    }

    fn document_path<'a>(&'a self, id: &'a RecordId) -> [&'a str; 2] {
        [self.name.as_str(), id.as_str()]
    }
}

#[async_trait]
impl Collection for FirestoreCollection {
    fn name(&self) -> &CollectionName {
        &self.name
    }

    #[instrument(skip(self), fields(collection = %self.name))]
    async fn list_all(&self) -> Result<Vec<Usuario>> {
        debug!("Listing documents via Firestore");

        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page: ListDocumentsResponse = {
                let mut query = vec![("pageSize", PAGE_SIZE)];
                if let Some(token) = page_token.as_deref() {
                    query.push(("pageToken", token));
                }
                self.client.get(&[self.name.as_str()], &query).await?
            };

            for doc in &page.documents {
                match doc.to_usuario() {
                    Ok(usuario) => {
                        if !usuario.is_valid() {
                            debug!(id = %usuario.id, "Listed document fails the form rules");
                        }
                        records.push(usuario);
                    }
                    Err(reason) => warn!(name = %doc.name, %reason, "Skipping document"),
                }
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(count = records.len(), "Listed documents");
        Ok(records)
    }

    #[instrument(skip(self, fields), fields(collection = %self.name))]
    async fn insert(&self, fields: &UsuarioFields) -> Result<Usuario> {
        debug!("Inserting document via Firestore");

        let created: Document = self
            .client
            .post(&[self.name.as_str()], &WriteDocument::new(fields))
            .await?;

        let id = created
            .id()
            .map_err(|message| StoreError::MalformedResponse { message })?;

        debug!(%id, "Inserted document");
        Ok(Usuario::from_parts(id, fields.clone()))
    }

    #[instrument(skip(self, fields), fields(collection = %self.name, %id))]
    async fn update(&self, id: &RecordId, fields: &UsuarioFields) -> Result<()> {
        debug!("Updating document via Firestore");

        let mut query: Vec<(&str, &str)> = FIELD_PATHS
            .iter()
            .map(|path| ("updateMask.fieldPaths", *path))
            .collect();
        query.push(("currentDocument.exists", "true"));

        let _: IgnoredAny = self
            .client
            .patch(&self.document_path(id), &query, &WriteDocument::new(fields))
            .await?;

        Ok(())
    }

    #[instrument(skip(self), fields(collection = %self.name, %id))]
    async fn remove(&self, id: &RecordId) -> Result<()> {
        debug!("Removing document via Firestore");
        self.client.delete(&self.document_path(id)).await
    }
}
