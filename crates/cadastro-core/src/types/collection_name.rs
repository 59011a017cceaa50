//! Collection name type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::record_id::check_document_key;
use crate::error::{Error, InvalidInputError};

/// A validated collection name.
///
/// # Example
///
/// ```
/// use cadastro_core::CollectionName;
///
/// let name = CollectionName::new("usuarios").unwrap();
/// assert_eq!(name.as_str(), "usuarios");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionName(String);

impl CollectionName {
    /// The collection holding usuario records unless configured otherwise.
    pub const DEFAULT: &'static str = "usuarios";

    /// Create a new collection name, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        check_document_key(&s).map_err(|reason| InvalidInputError::CollectionName {
            value: s.clone(),
            reason,
        })?;
        Ok(Self(s))
    }

    /// Returns the name string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CollectionName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CollectionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CollectionName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CollectionName> for String {
    fn from(name: CollectionName) -> Self {
        name.0
    }
}
