use crate::domain::common::{Entity, EntityId, PersonRef};
use crate::shared::dates::date_prefix;
use crate::shared::text::capitalize_words;
use crate::shared::validation::ValidationRules;
use serde::{Deserialize, Serialize};

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Insumos",
    "Servicios Básicos",
    "Arriendo",
    "Sueldos",
    "Mantención",
    "Otros",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Option<EntityId>,

    #[serde(rename = "descripcion", default)]
    pub description: String,

    #[serde(rename = "monto", default)]
    pub amount: i64,

    /// `YYYY-MM-DD`
    #[serde(rename = "fechaGasto", default)]
    pub expense_date: Option<String>,

    #[serde(rename = "categoriaGasto", default)]
    pub category: String,

    #[serde(rename = "empleado", default)]
    pub employee: Option<PersonRef>,
}

impl Entity for Expense {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        self.description.clone()
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "description" => Some(self.description.clone()),
            "category" => Some(self.category.clone()),
            "amount" => Some(self.amount.to_string()),
            "employee" => self.employee.as_ref().map(|e| e.full_name.clone()),
            _ => None,
        }
    }

    fn date_value(&self) -> Option<String> {
        self.expense_date.as_deref().and_then(date_prefix)
    }

    fn category_value(&self) -> Option<String> {
        Some(self.category.clone()).filter(|c| !c.is_empty())
    }

    fn validate(&self) -> Result<(), String> {
        ValidationRules::required()
            .with_max_length(100)
            .validate_string(&self.description, "descripción")?;
        ValidationRules::none()
            .with_min(1.0)
            .validate_number(self.amount as f64, "monto")?;
        ValidationRules::required()
            .validate_string(self.expense_date.as_deref().unwrap_or_default(), "fecha")
    }

    fn normalized(mut self) -> Self {
        self.description = self.description.trim().to_string();
        self.category = capitalize_words(self.category.trim());
        self
    }

    fn resource() -> &'static str {
        "gastos"
    }

    fn action_name() -> Option<&'static str> {
        Some("gasto")
    }

    fn element_name() -> &'static str {
        "Gasto"
    }

    fn list_name() -> &'static str {
        "Gastos"
    }

    fn search_fields() -> &'static [&'static str] {
        &["description", "category", "amount", "employee"]
    }
}
