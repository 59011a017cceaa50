//! Connection parameters for a Firestore project.

use std::fmt;
use std::time::Duration;

use cadastro_core::Result;
use cadastro_core::error::InvalidInputError;
use cadastro_core::types::StoreUrl;

/// Database id used when none is configured.
pub const DEFAULT_DATABASE: &str = "(default)";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A Firebase web API key.
///
/// Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Everything needed to reach one Firestore database.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// REST endpoint; the hosted service or an emulator.
    pub url: StoreUrl,
    pub project_id: String,
    pub api_key: ApiKey,
    /// Database id within the project.
    pub database: String,
    pub timeout: Duration,
}

impl FirestoreConfig {
    /// Configuration for the hosted service with default database and timeout.
    pub fn new(project_id: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            url: StoreUrl::firestore(),
            project_id: project_id.into(),
            api_key,
            database: DEFAULT_DATABASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point at a different endpoint, such as the local emulator.
    pub fn with_url(mut self, url: StoreUrl) -> Self {
        self.url = url;
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the parts that end up in request paths.
    pub fn validate(&self) -> Result<()> {
        if !self.url.is_network() {
            return Err(InvalidInputError::StoreUrl {
                value: self.url.to_string(),
                reason: "Firestore needs an http(s) endpoint".to_string(),
            }
            .into());
        }

        for (setting, value) in [
            ("Firestore project id", &self.project_id),
            ("Firestore database", &self.database),
        ] {
            if value.is_empty() || value.contains('/') {
                return Err(InvalidInputError::Setting {
                    setting,
                    reason: format!("'{}' is empty or contains '/'", value),
                }
                .into());
            }
        }

        if self.api_key.as_str().is_empty() {
            return Err(InvalidInputError::Setting {
                setting: "Firestore API key",
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// URL of the documents root: `.../v1/projects/{p}/databases/{d}/documents`.
    pub fn documents_url(&self) -> String {
        self.url.endpoint(&format!(
            "v1/projects/{}/databases/{}/documents",
            self.project_id, self.database
        ))
    }
}
