pub mod form_fields;
pub mod pagination_controls;
