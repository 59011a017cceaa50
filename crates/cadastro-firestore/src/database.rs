//! Firestore-backed database connector.

use cadastro_core::Result;
use cadastro_core::traits::Database;
use cadastro_core::types::{CollectionName, StoreUrl};

use crate::client::FirestoreClient;
use crate::collection::FirestoreCollection;
use crate::config::FirestoreConfig;

/// A network-backed database using the Firestore REST API.
#[derive(Debug, Clone)]
pub struct FirestoreDatabase {
    config: FirestoreConfig,
    client: FirestoreClient,
}

impl FirestoreDatabase {
    /// Open a database handle. No request is made yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or the HTTP
    /// client cannot be built.
    pub fn new(config: FirestoreConfig) -> Result<Self> {
        let client = FirestoreClient::new(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }
}

impl Database for FirestoreDatabase {
    type Collection = FirestoreCollection;

    fn url(&self) -> &StoreUrl {
        &self.config.url
    }

    fn collection(&self, name: &CollectionName) -> Self::Collection {
        FirestoreCollection::new(self.client.clone(), name.clone())
    }
}
