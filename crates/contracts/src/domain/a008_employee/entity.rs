use crate::domain::common::{Entity, EntityId};
use crate::shared::validation::ValidationRules;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Option<EntityId>,

    #[serde(rename = "nombreCompleto", default)]
    pub full_name: String,

    #[serde(rename = "correo", default)]
    pub email: Option<String>,

    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,

    #[serde(rename = "sueldoBase", default)]
    pub base_salary: i64,

    /// Percent, 0..=100
    #[serde(rename = "comisionPorcentaje", default)]
    pub commission_percent: Option<i64>,

    #[serde(rename = "activo", default)]
    pub active: bool,

    /// `YYYY-MM-DD`
    #[serde(rename = "fechaIngreso", default)]
    pub hired_on: Option<String>,
}

impl Default for Employee {
    fn default() -> Self {
        Self {
            id: None,
            full_name: String::new(),
            email: None,
            phone: None,
            base_salary: 0,
            commission_percent: None,
            active: true,
            hired_on: None,
        }
    }
}

impl Entity for Employee {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        self.full_name.clone()
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "full_name" => Some(self.full_name.clone()),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        ValidationRules::required()
            .with_max_length(100)
            .validate_string(&self.full_name, "nombre completo")?;
        ValidationRules::email()
            .validate_string(self.email.as_deref().unwrap_or_default(), "correo")?;
        ValidationRules::none()
            .with_min(0.0)
            .validate_number(self.base_salary as f64, "sueldo base")?;
        if let Some(commission) = self.commission_percent {
            ValidationRules::none()
                .with_min(0.0)
                .with_max(100.0)
                .validate_number(commission as f64, "comisión")?;
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        self.full_name = self.full_name.trim().to_string();
        self.email = self
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        self
    }

    fn resource() -> &'static str {
        "empleados"
    }

    fn action_name() -> Option<&'static str> {
        Some("empleado")
    }

    fn element_name() -> &'static str {
        "Empleado"
    }

    fn list_name() -> &'static str {
        "Empleados"
    }

    fn search_fields() -> &'static [&'static str] {
        &["full_name", "email", "phone"]
    }
}
