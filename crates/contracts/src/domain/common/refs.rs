//! Nested references embedded in entity payloads.
//!
//! The backend serializes related records in full; only the fields the
//! admin views display are kept, unknown fields are ignored.

use super::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: Option<EntityId>,
    #[serde(rename = "descripcion", default)]
    pub description: String,
}

/// Client or employee reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: Option<EntityId>,
    #[serde(rename = "nombreCompleto", default)]
    pub full_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: Option<EntityId>,
    #[serde(rename = "nombre", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierRef {
    pub id: Option<EntityId>,
    #[serde(rename = "nombre", default)]
    pub name: String,
}
