use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Event, NewEvent};
use crate::schemas::EventUpdate;
use crate::services::EventResult;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryEventRepository;
pub use postgres::PgEventRepository;

/// Data access for the `events` table.
///
/// Every call owns its connection (or transaction) for its own duration, so
/// nothing is held open between requests. Absence is reported as `None` or
/// `false`; only store failures and title conflicts are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, input: NewEvent) -> EventResult<Event>;

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>>;

    /// Applies the supplied fields and bumps `updated_at`.
    async fn update(&self, id: Uuid, changes: EventUpdate) -> EventResult<Option<Event>>;

    async fn delete(&self, id: Uuid) -> EventResult<bool>;

    /// Page of events ordered by `created_at`, then `id`.
    async fn list(&self, skip: u64, limit: u64) -> EventResult<Vec<Event>>;

    async fn count(&self) -> EventResult<i64>;
}
