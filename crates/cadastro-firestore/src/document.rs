//! Firestore wire types and typed-value encoding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use cadastro_core::types::RecordId;
use cadastro_core::usuario::{Usuario, UsuarioFields};

/// Fields written on insert and overwritten on update.
pub(crate) const FIELD_PATHS: [&str; 3] = ["nome", "idade", "contato"];

/// A document as returned by the REST API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Document {
    /// Full resource name, ending in `/{collection}/{id}`.
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Request body for create and patch.
#[derive(Debug, Serialize)]
pub(crate) struct WriteDocument {
    pub fields: Value,
}

impl WriteDocument {
    pub fn new(fields: &UsuarioFields) -> Self {
        Self {
            fields: json!({
                "nome": { "stringValue": fields.nome.as_str() },
                "idade": { "integerValue": fields.idade.to_string() },
                "contato": { "stringValue": fields.contato.as_str() },
            }),
        }
    }
}

/// Response from a list call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Google API error envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    #[allow(dead_code)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Document {
    /// The document id: the last segment of the resource name.
    pub fn id(&self) -> Result<RecordId, String> {
        let last = self.name.rsplit('/').next().unwrap_or_default();
        RecordId::new(last).map_err(|e| e.to_string())
    }

    /// Decode into a usuario.
    ///
    /// Only an unusable id is an error. Field values are kept as stored,
    /// whether or not they pass the form rules.
    pub fn to_usuario(&self) -> Result<Usuario, String> {
        Ok(Usuario {
            id: self.id()?,
            nome: self.text_field("nome"),
            idade: self.whole_number_field("idade"),
            contato: self.text_field("contato"),
        })
    }

    fn field(&self, name: &str) -> Option<&Map<String, Value>> {
        self.fields.get(name).and_then(Value::as_object)
    }

    /// Strings as stored, numbers in decimal, anything else empty.
    fn text_field(&self, name: &str) -> String {
        let Some(value) = self.field(name) else {
            return String::new();
        };
        ["stringValue", "integerValue", "doubleValue"]
            .iter()
            .find_map(|kind| match value.get(*kind)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Integers arrive as decimal strings; numbers written by the web SDK
    /// may also show up as JSON numbers or doubles. `NaN` and the
    /// infinities arrive as strings in `doubleValue`.
    fn whole_number_field(&self, name: &str) -> Option<u32> {
        let value = self.field(name)?;
        match (value.get("integerValue"), value.get("doubleValue")) {
            (Some(Value::String(s)), _) => s.parse::<u32>().ok(),
            (Some(Value::Number(n)), _) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            (None, Some(Value::Number(n))) => n.as_f64().and_then(whole),
            (None, Some(Value::String(s))) => s.parse::<f64>().ok().and_then(whole),
            _ => value
                .get("stringValue")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<u32>().ok()),
        }
    }
}

fn whole(f: f64) -> Option<u32> {
    (f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u32::MAX)).then_some(f as u32)
}
