//! Generic controller behind every admin list page.
//!
//! The controller owns the list state and talks to the outside world only
//! through [`ApiPort`] and [`NotificationPort`], so it runs the same way
//! against the REST backend and against in-memory fakes.

mod controller;
mod error;
mod ports;
mod refresh;
pub mod state;

pub use controller::{EntityListController, ListConfig, ListMessages, RemoveOutcome, Validator};
pub use error::{ApiError, ListError};
pub use ports::{ApiPort, NotificationPort};
pub use refresh::RefreshPolicy;
pub use state::ListState;

#[cfg(test)]
mod tests;
