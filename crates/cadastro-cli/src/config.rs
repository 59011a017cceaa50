//! Layered configuration: defaults, config file, environment, flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use cadastro_core::types::{CollectionName, StoreUrl};
use cadastro_firestore::{ApiKey, FirestoreConfig};

use crate::cli::StoreArgs;

/// Contents of `config.json`. Every key is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    store: Option<String>,
    project_id: Option<String>,
    api_key: Option<String>,
    collection: Option<String>,
    database: Option<String>,
    timeout_secs: Option<u64>,
}

/// Get the default config file path.
fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cadastro").map(|dirs| dirs.config_dir().join("config.json"))
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Load the config file named by `--config`, or the default one if it exists.
fn load_config_file(explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return read_config_file(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "Using config file");
            read_config_file(&path)
        }
        _ => Ok(ConfigFile::default()),
    }
}

/// Resolved store settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store: StoreUrl,
    pub collection: CollectionName,
    /// Present when the store is a Firestore endpoint.
    pub firestore: Option<FirestoreConfig>,
}

impl Settings {
    /// Merge the config file under the flag/environment values.
    pub fn resolve(args: &StoreArgs) -> Result<Self> {
        let file = load_config_file(args.config.as_deref())?;
        Self::merge(args, file)
    }

    fn merge(args: &StoreArgs, file: ConfigFile) -> Result<Self> {
        let store = match args.store.as_deref().or(file.store.as_deref()) {
            Some(s) => StoreUrl::new(s).context("Invalid store URL")?,
            None => StoreUrl::firestore(),
        };

        let collection = match args.collection.as_deref().or(file.collection.as_deref()) {
            Some(c) => CollectionName::new(c).context("Invalid collection name")?,
            None => CollectionName::default(),
        };

        let firestore = if store.is_local() {
            None
        } else {
            let Some(project_id) = args.project_id.clone().or(file.project_id) else {
                bail!(
                    "Firestore store {} needs a project id.\n\
                     Pass --project-id or set CADASTRO_PROJECT_ID.",
                    store
                );
            };
            let Some(api_key) = args.api_key.clone().or(file.api_key) else {
                bail!(
                    "Firestore store {} needs an API key.\n\
                     Pass --api-key or set CADASTRO_API_KEY.",
                    store
                );
            };

            let mut config =
                FirestoreConfig::new(project_id, ApiKey::new(api_key)).with_url(store.clone());
            if let Some(database) = file.database {
                config = config.with_database(database);
            }
            if let Some(secs) = file.timeout_secs {
                config = config.with_timeout(Duration::from_secs(secs));
            }
            config.validate().context("Invalid Firestore configuration")?;
            Some(config)
        };

        Ok(Self {
            store,
            collection,
            firestore,
        })
    }
}
