//! Validation rules for form fields

use crate::shared::text::is_valid_email;

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub max_length: Option<usize>,
    pub email: bool,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            max_length: None,
            email: false,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    pub const fn with_min(self, min: f64) -> Self {
        Self {
            min: Some(min),
            ..self
        }
    }

    pub const fn with_max(self, max: f64) -> Self {
        Self {
            max: Some(max),
            ..self
        }
    }

    pub const fn with_max_length(self, max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
            ..self
        }
    }

    /// Optional email: blank passes, anything else must look like an address
    pub const fn email() -> Self {
        Self {
            email: true,
            ..Self::none()
        }
    }

    /// Validate a string value against the rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        let trimmed = value.trim();
        if self.required && trimmed.is_empty() {
            return Err(format!("El campo {} es obligatorio", field_label));
        }

        if let Some(max) = self.max_length {
            if trimmed.chars().count() > max {
                return Err(format!(
                    "El campo {} no puede superar {} caracteres",
                    field_label, max
                ));
            }
        }

        if self.email && !trimmed.is_empty() && !is_valid_email(trimmed) {
            return Err("Por favor ingrese un email válido".to_string());
        }

        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if let Some(min) = self.min {
            if value < min {
                return Err(format!("El campo {} debe ser como mínimo {}", field_label, min));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(format!("El campo {} debe ser como máximo {}", field_label, max));
            }
        }

        Ok(())
    }

    /// Validate an optional reference (select box)
    pub fn validate_present<T>(&self, value: Option<&T>, field_label: &str) -> Result<(), String> {
        if self.required && value.is_none() {
            return Err(format!("Debe seleccionar {}", field_label));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_string() {
        let rules = ValidationRules::required().with_max_length(5);
        assert!(rules.validate_string("  ", "nombre").is_err());
        assert!(rules.validate_string("Ana", "nombre").is_ok());
        assert_eq!(
            rules.validate_string("Anabella", "nombre"),
            Err("El campo nombre no puede superar 5 caracteres".to_string())
        );
    }

    #[test]
    fn test_number_range() {
        let rules = ValidationRules::none().with_min(0.0).with_max(100.0);
        assert!(rules.validate_number(0.0, "comisión").is_ok());
        assert!(rules.validate_number(-1.0, "comisión").is_err());
        assert!(rules.validate_number(101.0, "comisión").is_err());
    }

    #[test]
    fn test_optional_email() {
        let rules = ValidationRules::email();
        assert!(rules.validate_string("", "correo").is_ok());
        assert!(rules.validate_string("ana@luna.com", "correo").is_ok());
        assert!(rules.validate_string("ana", "correo").is_err());
    }
}
