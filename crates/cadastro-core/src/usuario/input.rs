//! Raw form input and its validation.

use serde::{Deserialize, Serialize};

use super::{Contato, Nome, Usuario, UsuarioFields};
use crate::error::{Field, FieldIssue, ValidationError};

/// The three form inputs, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub nome: String,
    pub idade: String,
    pub contato: String,
}

impl FormInput {
    pub fn new(
        nome: impl Into<String>,
        idade: impl Into<String>,
        contato: impl Into<String>,
    ) -> Self {
        Self {
            nome: nome.into(),
            idade: idade.into(),
            contato: contato.into(),
        }
    }

    /// Pre-fill the form from an existing record.
    pub fn from_usuario(usuario: &Usuario) -> Self {
        Self {
            nome: usuario.nome.clone(),
            idade: usuario.idade.map(|idade| idade.to_string()).unwrap_or_default(),
            contato: usuario.contato.clone(),
        }
    }

    /// Returns true if every input is empty.
    pub fn is_empty(&self) -> bool {
        self.nome.is_empty() && self.idade.is_empty() && self.contato.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check every field rule and build the validated fields.
    ///
    /// All issues are collected, not just the first. Values are not
    /// trimmed; what the user typed is what gets checked.
    pub fn validate(&self) -> Result<UsuarioFields, ValidationError> {
        let mut issues = Vec::new();

        let nome = Nome::new(self.nome.as_str()).map_err(|issue| issues.push(issue)).ok();

        let idade = if self.idade.is_empty() {
            issues.push(FieldIssue::Missing(Field::Idade));
            None
        } else {
            self.idade
                .parse::<u32>()
                .map_err(|_| issues.push(FieldIssue::InvalidIdade(self.idade.clone())))
                .ok()
        };

        let contato = if self.contato.is_empty() {
            issues.push(FieldIssue::Missing(Field::Contato));
            None
        } else {
            Contato::new(self.contato.as_str())
                .map_err(|issue| issues.push(issue))
                .ok()
        };

        match (nome, idade, contato) {
            (Some(nome), Some(idade), Some(contato)) => Ok(UsuarioFields {
                nome,
                idade,
                contato,
            }),
            _ => Err(ValidationError::new(issues)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordId;

    #[test]
    fn valid_email_input() {
        let fields = FormInput::new("Ana", "30", "ana@example.com")
            .validate()
            .unwrap();
        assert_eq!(fields.nome.as_str(), "Ana");
        assert_eq!(fields.idade, 30);
        assert_eq!(fields.contato.as_str(), "ana@example.com");
    }

    #[test]
    fn valid_phone_input() {
        let fields = FormInput::new("Carla", "41", "11987654321")
            .validate()
            .unwrap();
        assert!(fields.contato.is_celular());
    }

    #[test]
    fn short_phone_is_rejected() {
        let err = FormInput::new("Bob", "20", "12345").validate().unwrap_err();
        assert_eq!(
            err.issues(),
            &[FieldIssue::InvalidContato("12345".to_string())]
        );
    }

    #[test]
    fn empty_form_reports_every_field() {
        let err = FormInput::default().validate().unwrap_err();
        assert!(err.has(Field::Nome));
        assert!(err.has(Field::Idade));
        assert!(err.has(Field::Contato));
        assert_eq!(err.summary(), "Por favor, preencha todos os campos.");
    }

    #[test]
    fn non_integer_idade_is_rejected() {
        for idade in ["trinta", "30.5", "-1", " 30"] {
            let err = FormInput::new("Ana", idade, "ana@example.com")
                .validate()
                .unwrap_err();
            assert_eq!(err.issues(), &[FieldIssue::InvalidIdade(idade.to_string())]);
        }
    }

    #[test]
    fn from_usuario_round_trips_through_validate() {
        let usuario = Usuario::from_parts(
            RecordId::new("abc").unwrap(),
            FormInput::new("Ana", "30", "ana@example.com")
                .validate()
                .unwrap(),
        );
        let input = FormInput::from_usuario(&usuario);
        assert_eq!(input, FormInput::new("Ana", "30", "ana@example.com"));
        assert_eq!(input.validate().unwrap(), usuario.fields().unwrap());
    }

    #[test]
    fn from_usuario_leaves_unusable_idade_blank() {
        let usuario = Usuario {
            id: RecordId::new("b2").unwrap(),
            nome: "Bob".to_string(),
            idade: None,
            contato: "12345".to_string(),
        };
        assert_eq!(FormInput::from_usuario(&usuario), FormInput::new("Bob", "", "12345"));
    }

    #[test]
    fn clear_empties_all_inputs() {
        let mut input = FormInput::new("Ana", "30", "ana@example.com");
        input.clear();
        assert!(input.is_empty());
    }
}
