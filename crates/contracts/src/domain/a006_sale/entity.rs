use crate::domain::common::{Entity, EntityId, PersonRef};
use crate::shared::dates::date_prefix;
use crate::shared::validation::ValidationRules;
use serde::{Deserialize, Serialize};

pub const PAYMENT_METHODS: &[&str] = &["Efectivo", "Débito", "Crédito", "Transferencia"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Option<EntityId>,

    /// RFC 3339 instant
    #[serde(rename = "fechaVenta", default)]
    pub sold_at: Option<String>,

    #[serde(rename = "cantidadArticulos", default)]
    pub item_count: i64,

    #[serde(rename = "montoTotal", default)]
    pub total_amount: i64,

    #[serde(rename = "descuentoAplicado", default)]
    pub discount: Option<i64>,

    #[serde(rename = "devolucion", default)]
    pub is_return: bool,

    #[serde(rename = "cliente", default)]
    pub client: Option<PersonRef>,

    #[serde(rename = "empleado", default)]
    pub employee: Option<PersonRef>,

    #[serde(rename = "metodoPago", default)]
    pub payment_method: String,

    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
}

impl Entity for Sale {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        match self.id {
            Some(id) => format!("Venta #{}", id),
            None => "Venta nueva".to_string(),
        }
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "client" => self.client.as_ref().map(|c| c.full_name.clone()),
            "employee" => self.employee.as_ref().map(|e| e.full_name.clone()),
            "payment_method" => Some(self.payment_method.clone()),
            "notes" => self.notes.clone(),
            "total_amount" => Some(self.total_amount.to_string()),
            _ => None,
        }
    }

    fn date_value(&self) -> Option<String> {
        self.sold_at.as_deref().and_then(date_prefix)
    }

    fn category_value(&self) -> Option<String> {
        Some(self.payment_method.clone()).filter(|m| !m.is_empty())
    }

    fn validate(&self) -> Result<(), String> {
        ValidationRules::none()
            .with_min(1.0)
            .validate_number(self.item_count as f64, "cantidad de artículos")?;
        ValidationRules::none()
            .with_min(0.0)
            .validate_number(self.total_amount as f64, "monto total")?;
        if let Some(discount) = self.discount {
            ValidationRules::none()
                .with_min(0.0)
                .with_max(self.total_amount as f64)
                .validate_number(discount as f64, "descuento")?;
        }
        ValidationRules::required().validate_string(&self.payment_method, "método de pago")
    }

    fn resource() -> &'static str {
        "ventas"
    }

    fn action_name() -> Option<&'static str> {
        Some("venta")
    }

    fn element_name() -> &'static str {
        "Venta"
    }

    fn list_name() -> &'static str {
        "Ventas"
    }

    fn search_fields() -> &'static [&'static str] {
        &["client", "employee", "payment_method"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_date_and_category() {
        let s: Sale = serde_json::from_str(
            r#"{"id":9,"fechaVenta":"2024-06-01T15:04:05Z","cantidadArticulos":2,
                "montoTotal":12000,"metodoPago":"Efectivo",
                "cliente":{"id":1,"nombreCompleto":"Ana Luna","telefono":"1"}}"#,
        )
        .unwrap();
        assert_eq!(s.date_value().as_deref(), Some("2024-06-01"));
        assert_eq!(s.category_value().as_deref(), Some("Efectivo"));
        assert_eq!(s.field_text("client").as_deref(), Some("Ana Luna"));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_discount_cannot_exceed_total() {
        let s = Sale {
            item_count: 1,
            total_amount: 1000,
            discount: Some(1500),
            payment_method: "Débito".into(),
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }
}
