use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Event, NewEvent};
use crate::repository::EventRepository;
use crate::schemas::{EventCreate, EventListResponse, EventUpdate, ListParams};
use crate::services::{EventError, EventResult};

/// Business rules for events on top of an [`EventRepository`].
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// Logs store failures once, at the service boundary.
fn log_failure(operation: &'static str, err: &EventError) {
    match err {
        EventError::Database(e) => error!(operation, error = ?e, "Event store failure"),
        EventError::DuplicateTitle(title) => warn!(operation, %title, "Duplicate event title"),
        EventError::Validation(_) => {}
    }
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create(&self, input: EventCreate) -> EventResult<Event> {
        if let Err(e) = input.validate() {
            warn!(error = %e, "Validation error during event creation");
            return Err(EventError::Validation(e.to_string()));
        }

        let Some(title) = input.title else {
            return Err(EventError::Validation("title: title is required".to_string()));
        };
        let new_event = NewEvent {
            title,
            createdby: input.createdby,
            startdate: input.startdate,
            enddate: input.enddate,
        };

        self.repository
            .create(new_event)
            .await
            .inspect_err(|e| log_failure("create", e))
    }

    pub async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        self.repository
            .get_by_id(id)
            .await
            .inspect_err(|e| log_failure("get_by_id", e))
    }

    pub async fn update(&self, id: Uuid, changes: EventUpdate) -> EventResult<Option<Event>> {
        if let Err(e) = changes.validate() {
            warn!(event_id = %id, error = %e, "Validation error during event update");
            return Err(EventError::Validation(e.to_string()));
        }

        self.repository
            .update(id, changes)
            .await
            .inspect_err(|e| log_failure("update", e))
    }

    pub async fn delete(&self, id: Uuid) -> EventResult<bool> {
        self.repository
            .delete(id)
            .await
            .inspect_err(|e| log_failure("delete", e))
    }

    pub async fn list(&self, skip: u64, limit: u64) -> EventResult<Vec<Event>> {
        self.repository
            .list(skip, limit)
            .await
            .inspect_err(|e| log_failure("list", e))
    }

    pub async fn count(&self) -> EventResult<i64> {
        self.repository
            .count()
            .await
            .inspect_err(|e| log_failure("count", e))
    }

    /// Total count plus one page, shaped for the list endpoint.
    pub async fn page(&self, params: ListParams) -> EventResult<EventListResponse> {
        let total = self.count().await?;
        let events = self.list(params.skip, params.limit).await?;

        Ok(EventListResponse::new(events, total, &params))
    }
}
