use serde::{de::DeserializeOwned, Serialize};

/// Backend identifiers are numeric (`Integer`/`Long` columns).
pub type EntityId = i64;

/// Trait for every record shown in an admin list.
///
/// Defines identity, the REST naming used by the backend, and the per-field
/// projections the list controller filters on.
pub trait Entity:
    Clone + Default + PartialEq + Serialize + DeserializeOwned + std::fmt::Debug + Send + Sync + 'static
{
    // ============================================================================
    // Instance data
    // ============================================================================

    /// Record ID, `None` for a draft that was never saved
    fn id(&self) -> Option<EntityId>;

    /// Short human label used in confirmations (e.g. a client's full name)
    fn display_name(&self) -> String;

    /// Text value of a searchable field, keyed by Rust field name
    fn field_text(&self, field: &str) -> Option<String>;

    /// Date of the record as `YYYY-MM-DD`, for entities filtered by date
    fn date_value(&self) -> Option<String> {
        None
    }

    /// Category-like value for the optional category filter
    fn category_value(&self) -> Option<String> {
        None
    }

    /// Client-side form checks, run before any request is sent
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Normalization applied to a draft before submit
    fn normalized(self) -> Self {
        self
    }

    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Collection path under the API base (e.g. "categoria-servicios")
    fn resource() -> &'static str;

    /// Suffix of the mutation endpoints (`agregar_{action}`), `None` for read-only lists
    fn action_name() -> Option<&'static str>;

    /// UI name, singular (e.g. "Categoría")
    fn element_name() -> &'static str;

    /// UI name, plural (e.g. "Categorías de servicios")
    fn list_name() -> &'static str;

    /// Fields matched by the search box unless a page overrides them
    fn search_fields() -> &'static [&'static str];

    fn is_read_only() -> bool {
        Self::action_name().is_none()
    }
}
