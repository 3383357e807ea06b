use crate::domain::common::{Entity, EntityId};
use crate::shared::dates::date_prefix;
use serde::{Deserialize, Serialize};

/// One audit trail record written by the backend; never edited from the UI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Option<EntityId>,

    #[serde(rename = "usuarioNombre", default)]
    pub user_name: String,

    #[serde(rename = "accion", default)]
    pub action: String,

    #[serde(rename = "tablaAfectada", default)]
    pub table_name: Option<String>,

    #[serde(rename = "registroId", default)]
    pub record_id: Option<EntityId>,

    #[serde(rename = "detalles", default)]
    pub details: Option<String>,

    #[serde(rename = "ipAddress", default)]
    pub ip_address: Option<String>,

    /// Local date-time, `YYYY-MM-DDTHH:MM:SS`
    #[serde(rename = "fechaHora", default)]
    pub happened_at: Option<String>,
}

impl Entity for AuditEntry {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} {}", self.user_name, self.action)
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "user_name" => Some(self.user_name.clone()),
            "action" => Some(self.action.clone()),
            "table_name" => self.table_name.clone(),
            "details" => self.details.clone(),
            _ => None,
        }
    }

    fn date_value(&self) -> Option<String> {
        self.happened_at.as_deref().and_then(date_prefix)
    }

    fn category_value(&self) -> Option<String> {
        Some(self.action.clone()).filter(|a| !a.is_empty())
    }

    fn resource() -> &'static str {
        "auditoria"
    }

    fn action_name() -> Option<&'static str> {
        None
    }

    fn element_name() -> &'static str {
        "Registro de auditoría"
    }

    fn list_name() -> &'static str {
        "Auditoría"
    }

    fn search_fields() -> &'static [&'static str] {
        &["user_name", "action", "table_name", "details"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only() {
        assert!(AuditEntry::is_read_only());
        let entry: AuditEntry = serde_json::from_str(
            r#"{"id":1,"usuarioId":3,"usuarioNombre":"admin","accion":"ELIMINAR",
                "tablaAfectada":"clientes","fechaHora":"2024-04-01T09:15:00"}"#,
        )
        .unwrap();
        assert_eq!(entry.date_value().as_deref(), Some("2024-04-01"));
        assert_eq!(entry.category_value().as_deref(), Some("ELIMINAR"));
    }
}
