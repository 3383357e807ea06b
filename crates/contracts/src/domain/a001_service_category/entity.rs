use crate::domain::common::{Entity, EntityId};
use crate::shared::text::capitalize_words;
use crate::shared::validation::ValidationRules;
use serde::{Deserialize, Serialize};

/// Grouping for salon services ("Cortes", "Coloración")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: Option<EntityId>,

    #[serde(rename = "descripcion", default)]
    pub description: String,
}

impl ServiceCategory {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: description.into(),
        }
    }
}

impl Entity for ServiceCategory {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        self.description.clone()
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "description" => Some(self.description.clone()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        ValidationRules::required()
            .with_max_length(50)
            .validate_string(&self.description, "descripción")
    }

    fn normalized(mut self) -> Self {
        self.description = capitalize_words(self.description.trim());
        self
    }

    fn resource() -> &'static str {
        "categoria-servicios"
    }

    fn action_name() -> Option<&'static str> {
        Some("categoria")
    }

    fn element_name() -> &'static str {
        "Categoría"
    }

    fn list_name() -> &'static str {
        "Categorías de servicios"
    }

    fn search_fields() -> &'static [&'static str] {
        &["description"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let parsed: ServiceCategory =
            serde_json::from_str(r#"{"id":3,"descripcion":"Cortes","servicios":[]}"#).unwrap();
        assert_eq!(parsed.id, Some(3));
        assert_eq!(parsed.description, "Cortes");

        let json = serde_json::to_value(ServiceCategory::new("Color")).unwrap();
        assert_eq!(json, serde_json::json!({"id": null, "descripcion": "Color"}));
    }

    #[test]
    fn test_normalize_and_validate() {
        let draft = ServiceCategory::new("  corte DE pelo ").normalized();
        assert_eq!(draft.description, "Corte De Pelo");
        assert!(draft.validate().is_ok());
        assert!(ServiceCategory::new("   ").validate().is_err());
    }
}
