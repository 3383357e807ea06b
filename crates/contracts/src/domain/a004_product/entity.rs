use crate::domain::common::{Entity, EntityId};
use crate::shared::validation::ValidationRules;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<EntityId>,

    #[serde(rename = "nombre", default)]
    pub name: String,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    #[serde(rename = "precioCompra", default)]
    pub purchase_price: i64,

    #[serde(rename = "precioVenta", default)]
    pub sale_price: i64,

    #[serde(rename = "cantidadStockInicial", default)]
    pub initial_stock: i64,

    #[serde(rename = "minimoStock", default)]
    pub min_stock: Option<i64>,

    #[serde(rename = "activo", default)]
    pub active: bool,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            purchase_price: 0,
            sale_price: 0,
            initial_stock: 0,
            min_stock: None,
            active: true,
        }
    }
}

impl Product {
    /// Stock at or below the configured minimum
    pub fn is_low_stock(&self) -> bool {
        self.min_stock
            .map(|min| self.initial_stock <= min)
            .unwrap_or(false)
    }
}

impl Entity for Product {
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
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        ValidationRules::required()
            .with_max_length(50)
            .validate_string(&self.name, "nombre")?;
        let non_negative = ValidationRules::none().with_min(0.0);
        non_negative.validate_number(self.purchase_price as f64, "precio de compra")?;
        non_negative.validate_number(self.sale_price as f64, "precio de venta")?;
        non_negative.validate_number(self.initial_stock as f64, "stock")?;
        if self.sale_price < self.purchase_price {
            return Err("El precio de venta no puede ser menor al precio de compra".into());
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }

    fn resource() -> &'static str {
        "productos"
    }

    fn action_name() -> Option<&'static str> {
        Some("producto")
    }

    fn element_name() -> &'static str {
        "Producto"
    }

    fn list_name() -> &'static str {
        "Productos"
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "description"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rules() {
        let mut p = Product {
            name: "Shampoo".into(),
            purchase_price: 3000,
            sale_price: 5000,
            ..Default::default()
        };
        assert!(p.validate().is_ok());
        p.sale_price = 2000;
        assert!(p.validate().is_err());
        p.sale_price = 5000;
        p.purchase_price = -1;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_low_stock() {
        let mut p = Product {
            initial_stock: 3,
            min_stock: Some(5),
            ..Default::default()
        };
        assert!(p.is_low_stock());
        p.min_stock = None;
        assert!(!p.is_low_stock());
    }
}
