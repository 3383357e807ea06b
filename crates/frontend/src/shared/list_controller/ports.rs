//! Boundaries between the list controller and the browser.
//!
//! Futures are `?Send`: everything runs on the single UI thread.

use super::error::ApiError;
use async_trait::async_trait;
use contracts::domain::common::{Entity, EntityId};

/// CRUD access to one backend collection
#[async_trait(?Send)]
pub trait ApiPort<T: Entity> {
    async fn list(&self) -> Result<Vec<T>, ApiError>;

    async fn create(&self, body: &T) -> Result<T, ApiError>;

    async fn update(&self, id: EntityId, body: &T) -> Result<T, ApiError>;

    async fn delete(&self, id: EntityId) -> Result<(), ApiError>;
}

/// User-facing feedback.
///
/// `success`/`error`/`info` are fire-and-forget; `confirm` resolves once the
/// user answers and yields `true` only on acceptance.
#[async_trait(?Send)]
pub trait NotificationPort {
    fn success(&self, message: &str);

    fn error(&self, message: &str);

    fn info(&self, message: &str);

    async fn confirm(&self, message: &str) -> bool;
}
