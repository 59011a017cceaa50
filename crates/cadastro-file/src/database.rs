//! File-backed database connector.

use std::path::Path;

use cadastro_core::traits::Database;
use cadastro_core::types::{CollectionName, StoreUrl};

use crate::collection::FileCollection;
use crate::store::FileStore;

/// Filesystem-backed database.
#[derive(Debug, Clone)]
pub struct FileDatabase {
    store: FileStore,
    url: StoreUrl,
}

impl FileDatabase {
    /// Open a file-backed database rooted at the given directory.
    pub fn new(root: impl AsRef<Path>, url: StoreUrl) -> Self {
        Self {
            store: FileStore::new(root),
            url,
        }
    }

    /// Open the directory named by a `file://` store URL.
    ///
    /// Returns `None` if the URL is not a local one.
    pub fn from_url(url: StoreUrl) -> Option<Self> {
        let root = url.to_file_path()?;
        Some(Self::new(root, url))
    }

    /// Access the underlying file store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }
}

impl Database for FileDatabase {
    type Collection = FileCollection;

    fn url(&self) -> &StoreUrl {
        &self.url
    }

    fn collection(&self, name: &CollectionName) -> Self::Collection {
        FileCollection::new(self.store.clone(), name.clone())
    }
}
