use crate::domain::common::{CategoryRef, Entity, EntityId};
use crate::shared::validation::ValidationRules;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Option<EntityId>,

    #[serde(rename = "nombre", default)]
    pub name: String,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    #[serde(rename = "precioBase", default)]
    pub base_price: i64,

    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,

    #[serde(rename = "categoria", default)]
    pub category: Option<CategoryRef>,
}

fn default_active() -> bool {
    true
}

impl Default for Service {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            base_price: 0,
            active: true,
            category: None,
        }
    }
}

impl Entity for Service {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "description" => self.description.clone(),
            "category" => self.category.as_ref().map(|c| c.description.clone()),
            "base_price" => Some(self.base_price.to_string()),
            _ => None,
        }
    }

    fn category_value(&self) -> Option<String> {
        self.category.as_ref().map(|c| c.description.clone())
    }

    fn validate(&self) -> Result<(), String> {
        ValidationRules::required()
            .with_max_length(50)
            .validate_string(&self.name, "nombre")?;
        ValidationRules::none()
            .with_min(1.0)
            .validate_number(self.base_price as f64, "precio base")?;
        ValidationRules::required().validate_present(self.category.as_ref(), "una categoría")
    }

    fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }

    fn resource() -> &'static str {
        "servicios"
    }

    fn action_name() -> Option<&'static str> {
        Some("servicio")
    }

    fn element_name() -> &'static str {
        "Servicio"
    }

    fn list_name() -> &'static str {
        "Servicios"
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "description", "category"]
    }
}
