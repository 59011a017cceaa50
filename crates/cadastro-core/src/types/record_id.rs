//! Document identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Maximum length of a document key, in bytes.
const MAX_KEY_LEN: usize = 1500;

/// Check a string against the document-key rules shared by record ids and
/// collection names. Returns the reason on failure.
pub(crate) fn check_document_key(s: &str) -> Result<(), String> {
    if s.is_empty() {
        return Err("cannot be empty".to_string());
    }

    if s.len() > MAX_KEY_LEN {
        return Err(format!("exceeds maximum length of {} bytes", MAX_KEY_LEN));
    }

    if s == "." || s == ".." {
        return Err("cannot be '.' or '..'".to_string());
    }

    if s.len() >= 4 && s.starts_with("__") && s.ends_with("__") {
        return Err("names of the form __*__ are reserved".to_string());
    }

    if s.contains('/') {
        return Err("cannot contain '/'".to_string());
    }

    if s.contains('\0') {
        return Err("cannot contain NUL".to_string());
    }

    Ok(())
}

/// A validated document identifier.
///
/// Assigned by the store when a record is inserted and never changed
/// afterwards.
///
/// # Example
///
/// ```
/// use cadastro_core::RecordId;
///
/// let id = RecordId::new("Xk2fP0aQ9sLmN3bVc7Rt").unwrap();
/// assert_eq!(id.as_str(), "Xk2fP0aQ9sLmN3bVc7Rt");
/// assert!(RecordId::new("a/b").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Create a new record id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid document key.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        check_document_key(&s).map_err(|reason| InvalidInputError::RecordId {
            value: s.clone(),
            reason,
        })?;
        Ok(Self(s))
    }

    /// Returns the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
