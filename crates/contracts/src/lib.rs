//! Data contracts shared by the salon admin frontend.
//!
//! Every entity exchanged with the REST backend lives under [`domain`] and
//! implements [`domain::common::Entity`].

pub mod domain;
pub mod shared;
