use crate::domain::common::{Entity, EntityId};
use crate::shared::validation::ValidationRules;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: Option<EntityId>,

    #[serde(rename = "nombreCompleto", default)]
    pub full_name: String,

    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,

    #[serde(rename = "correo", default)]
    pub email: Option<String>,

    #[serde(rename = "redesSociales", default)]
    pub social_media: Option<String>,

    /// `YYYY-MM-DD`
    #[serde(rename = "fechaNacimiento", default)]
    pub birth_date: Option<String>,
}

impl Entity for Client {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        self.full_name.clone()
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "full_name" => Some(self.full_name.clone()),
            "phone" => self.phone.clone(),
            "email" => self.email.clone(),
            "social_media" => self.social_media.clone(),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        ValidationRules::required()
            .with_max_length(100)
            .validate_string(&self.full_name, "nombre completo")?;
        ValidationRules::email()
            .validate_string(self.email.as_deref().unwrap_or_default(), "correo")
    }

    fn normalized(mut self) -> Self {
        self.full_name = self.full_name.trim().to_string();
        self.email = self
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        self.phone = self
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self
    }

    fn resource() -> &'static str {
        "clientes"
    }

    fn action_name() -> Option<&'static str> {
        Some("cliente")
    }

    fn element_name() -> &'static str {
        "Cliente"
    }

    fn list_name() -> &'static str {
        "Clientes"
    }

    fn search_fields() -> &'static [&'static str] {
        &["full_name", "phone", "email"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(name: &str, email: Option<&str>) -> Client {
        Client {
            full_name: name.to_string(),
            email: email.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_validation() {
        assert!(client("Ana Luna", None).validate().is_ok());
        assert!(client("Ana Luna", Some("ana@luna.com")).validate().is_ok());
        assert_eq!(
            client("Ana Luna", Some("ana")).validate(),
            Err("Por favor ingrese un email válido".to_string())
        );
        assert!(client("", None).validate().is_err());
    }

    #[test]
    fn test_blank_email_is_dropped() {
        let c = client(" Ana ", Some("  ")).normalized();
        assert_eq!(c.full_name, "Ana");
        assert_eq!(c.email, None);
    }

    #[test]
    fn test_null_fields_deserialize() {
        let c: Client = serde_json::from_str(
            r#"{"id":1,"nombreCompleto":"Ana","telefono":null,"correo":"a@b.cl"}"#,
        )
        .unwrap();
        assert_eq!(c.phone, None);
        assert_eq!(c.field_text("email").as_deref(), Some("a@b.cl"));
    }
}
