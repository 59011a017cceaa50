//! Filesystem storage for the file-backed database.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use cadastro_core::Result;
use cadastro_core::error::{Error, RejectedError, StoreError, TransportError};
use cadastro_core::types::{CollectionName, RecordId};
use cadastro_core::usuario::{Usuario, UsuarioFields};

/// Length of generated document ids.
const ID_LEN: usize = 20;

fn map_io(err: std::io::Error) -> Error {
    TransportError::from(err).into()
}

fn malformed(err: serde_json::Error) -> Error {
    StoreError::MalformedResponse {
        message: err.to_string(),
    }
    .into()
}

/// A document on disk. Written with checked fields, read back as found.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument<F = StoredFields> {
    fields: F,
    create_time: DateTime<Utc>,
    update_time: DateTime<Utc>,
}

/// Fields as read back. Files may have been edited by hand, so values are
/// kept whatever their shape and missing ones read as null.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct StoredFields {
    nome: Value,
    idade: Value,
    contato: Value,
}

impl StoredFields {
    fn into_usuario(self, id: RecordId) -> Usuario {
        Usuario {
            id,
            nome: text(self.nome),
            idade: whole_number(&self.idade),
            contato: text(self.contato),
        }
    }
}

fn text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn whole_number(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(n) => u32::try_from(n).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32),
        },
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Exclusive writer lock held for the duration of a mutation.
struct WriteLock(File);

impl Drop for WriteLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.0);
    }
}

/// Filesystem-backed document storage.
///
/// Layout: `{root}/collections/{collection}/{id}.json`. Writers take an
/// exclusive lock on `{root}/store.lock`; readers do not lock, since each
/// document is replaced atomically by rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &CollectionName) -> PathBuf {
        self.root.join("collections").join(collection.as_str())
    }

    fn document_path(&self, collection: &CollectionName, id: &RecordId) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{}.json", id.as_str()))
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join("store.lock")
    }

    /// Generate a new document id.
    fn generate_id() -> RecordId {
        let raw = Uuid::new_v4().simple().to_string();
        // 32 lowercase hex characters always satisfy the key rules.
        RecordId::new(&raw[..ID_LEN]).expect("hex id is a valid record id")
    }

    fn lock(&self) -> Result<WriteLock> {
        fs::create_dir_all(&self.root).map_err(map_io)?;

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)?;

        file.lock_exclusive().map_err(map_io)?;
        Ok(WriteLock(file))
    }

    fn read_document(path: &Path) -> Result<StoredDocument> {
        let content = fs::read_to_string(path).map_err(map_io)?;
        serde_json::from_str(&content).map_err(malformed)
    }

    fn write_document(path: &Path, doc: &StoredDocument<UsuarioFields>) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }

        let content = serde_json::to_string_pretty(doc).map_err(malformed)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content).map_err(map_io)?;
        fs::rename(&temp_path, path).map_err(map_io)?;
        Ok(())
    }

    /// Read every document in a collection, ordered by id.
    ///
    /// Documents are listed whether or not their fields pass the form
    /// rules. Files that are not JSON documents, or whose name is not a
    /// usable id, are skipped with a warning.
    #[instrument(skip(self))]
    pub async fn list_documents(&self, collection: &CollectionName) -> Result<Vec<Usuario>> {
        let dir = self.collection_dir(collection);

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<_> = fs::read_dir(&dir)
            .map_err(map_io)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .collect();

        entries.sort_by_key(|e| e.file_name());

        let mut records = Vec::with_capacity(entries.len());

        for entry in entries {
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let id = match RecordId::new(stem) {
                Ok(id) => id,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping document with invalid id");
                    continue;
                }
            };

            match Self::read_document(&path) {
                Ok(doc) => records.push(doc.fields.into_usuario(id)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable document");
                }
            }
        }

        debug!(count = records.len(), "Listed documents");
        Ok(records)
    }

    /// Write a new document under a fresh id.
    #[instrument(skip(self, fields))]
    pub async fn insert_document(
        &self,
        collection: &CollectionName,
        fields: &UsuarioFields,
    ) -> Result<Usuario> {
        let _lock = self.lock()?;

        let (id, path) = loop {
            let id = Self::generate_id();
            let path = self.document_path(collection, &id);
            if !path.exists() {
                break (id, path);
            }
        };

        let now = Utc::now();
        let doc = StoredDocument {
            fields: fields.clone(),
            create_time: now,
            update_time: now,
        };
        Self::write_document(&path, &doc)?;

        debug!(%id, "Inserted document");

        Ok(Usuario::from_parts(id, fields.clone()))
    }

    /// Overwrite the fields of an existing document.
    #[instrument(skip(self, fields))]
    pub async fn update_document(
        &self,
        collection: &CollectionName,
        id: &RecordId,
        fields: &UsuarioFields,
    ) -> Result<()> {
        let _lock = self.lock()?;
        let path = self.document_path(collection, id);

        if !path.exists() {
            return Err(RejectedError::not_found(format!(
                "No document to update: {}/{}",
                collection, id
            ))
            .into());
        }

        let existing = Self::read_document(&path)?;
        let doc = StoredDocument {
            fields: fields.clone(),
            create_time: existing.create_time,
            update_time: Utc::now(),
        };
        Self::write_document(&path, &doc)?;

        debug!(%id, "Updated document");

        Ok(())
    }

    /// Delete a document if it exists.
    #[instrument(skip(self))]
    pub async fn delete_document(&self, collection: &CollectionName, id: &RecordId) -> Result<()> {
        let _lock = self.lock()?;
        let path = self.document_path(collection, id);

        if path.exists() {
            fs::remove_file(&path).map_err(map_io)?;
            debug!(%id, "Deleted document");
        }

        Ok(())
    }
}
