//! Common types and traits for all entities

pub mod entity;
pub mod refs;

// Re-exports
pub use entity::{Entity, EntityId};
pub use refs::{CategoryRef, PersonRef, ProductRef, SupplierRef};
