//! Contact (email or mobile number) type.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::error::FieldIssue;

// `\w` is spelled out: contact addresses are matched on ASCII word characters.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$")
        .expect("valid email regex")
});

static CELULAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,11}$").expect("valid phone regex"));

/// A contact that is either an email address or a 10-11 digit phone number.
///
/// # Example
///
/// ```
/// use cadastro_core::Contato;
///
/// assert!(Contato::new("ana@example.com").unwrap().is_email());
/// assert!(Contato::new("11987654321").unwrap().is_celular());
/// assert!(Contato::new("12345").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Contato {
    /// `local-part@domain.tld`, top-level label of 2-4 characters.
    Email(String),
    /// Digits only, 10 or 11 of them.
    Celular(String),
}

impl Contato {
    /// Classify and validate a contact string.
    ///
    /// # Errors
    ///
    /// Returns [`FieldIssue::InvalidContato`] if the string matches neither
    /// pattern.
    pub fn new(s: impl Into<String>) -> Result<Self, FieldIssue> {
        let s = s.into();
        if EMAIL_RE.is_match(&s) {
            Ok(Contato::Email(s))
        } else if CELULAR_RE.is_match(&s) {
            Ok(Contato::Celular(s))
        } else {
            Err(FieldIssue::InvalidContato(s))
        }
    }

    /// Returns the contact as entered.
    pub fn as_str(&self) -> &str {
        match self {
            Contato::Email(s) | Contato::Celular(s) => s,
        }
    }

    pub fn is_email(&self) -> bool {
        matches!(self, Contato::Email(_))
    }

    pub fn is_celular(&self) -> bool {
        matches!(self, Contato::Celular(_))
    }
}

impl fmt::Display for Contato {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Contato {
    type Error = FieldIssue;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Contato> for String {
    fn from(contato: Contato) -> Self {
        match contato {
            Contato::Email(s) | Contato::Celular(s) => s,
        }
    }
}
