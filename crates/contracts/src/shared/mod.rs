pub mod dates;
pub mod text;
pub mod validation;
