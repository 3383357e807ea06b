use crate::domain::common::{Entity, EntityId, ProductRef, SupplierRef};
use crate::shared::dates::date_prefix;
use crate::shared::validation::ValidationRules;
use serde::{Deserialize, Serialize};

/// Stock purchase from a supplier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Option<EntityId>,

    #[serde(rename = "producto", default)]
    pub product: Option<ProductRef>,

    #[serde(rename = "cantidad", default)]
    pub quantity: i64,

    #[serde(default)]
    pub total: i64,

    /// `YYYY-MM-DD`
    #[serde(rename = "fechaCompra", default)]
    pub purchase_date: Option<String>,

    #[serde(rename = "proveedor", default)]
    pub supplier: Option<SupplierRef>,
}

impl Entity for Purchase {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        let product = self
            .product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("sin producto");
        format!("{} x{}", product, self.quantity)
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "product" => self.product.as_ref().map(|p| p.name.clone()),
            "supplier" => self.supplier.as_ref().map(|s| s.name.clone()),
            "total" => Some(self.total.to_string()),
            _ => None,
        }
    }

    fn date_value(&self) -> Option<String> {
        self.purchase_date.as_deref().and_then(date_prefix)
    }

    fn validate(&self) -> Result<(), String> {
        ValidationRules::required().validate_present(self.product.as_ref(), "un producto")?;
        ValidationRules::none()
            .with_min(1.0)
            .validate_number(self.quantity as f64, "cantidad")?;
        ValidationRules::none()
            .with_min(0.0)
            .validate_number(self.total as f64, "total")?;
        ValidationRules::required()
            .validate_string(self.purchase_date.as_deref().unwrap_or_default(), "fecha de compra")
    }

    fn resource() -> &'static str {
        "compras"
    }

    fn action_name() -> Option<&'static str> {
        Some("compra")
    }

    fn element_name() -> &'static str {
        "Compra"
    }

    fn list_name() -> &'static str {
        "Compras"
    }

    fn search_fields() -> &'static [&'static str] {
        &["product", "supplier"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_order() {
        let mut p = Purchase::default();
        assert_eq!(p.validate(), Err("Debe seleccionar un producto".to_string()));
        p.product = Some(ProductRef {
            id: Some(1),
            name: "Shampoo".into(),
        });
        p.quantity = 2;
        assert_eq!(
            p.validate(),
            Err("El campo fecha de compra es obligatorio".to_string())
        );
        p.purchase_date = Some("2024-05-02".into());
        assert!(p.validate().is_ok());
        assert_eq!(p.date_value().as_deref(), Some("2024-05-02"));
    }
}
