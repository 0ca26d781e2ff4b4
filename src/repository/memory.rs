use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Event, NewEvent};
use crate::repository::EventRepository;
use crate::schemas::EventUpdate;
use crate::services::{EventError, EventResult};

/// Map-backed repository for local development and tests.
///
/// Mirrors the table's constraints: titles are unique, ids and timestamps are
/// assigned here.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn title_taken(events: &HashMap<Uuid, Event>, title: &str, except: Option<Uuid>) -> bool {
    events
        .values()
        .any(|e| e.title == title && Some(e.id) != except)
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, input: NewEvent) -> EventResult<Event> {
        let mut events = self.events.write().await;

        if title_taken(&events, &input.title, None) {
            return Err(EventError::DuplicateTitle(input.title));
        }

        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            title: input.title,
            createdby: input.createdby,
            startdate: input.startdate,
            enddate: input.enddate,
            created_at: now,
            updated_at: now,
        };
        events.insert(event.id, event.clone());

        Ok(event)
    }

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, changes: EventUpdate) -> EventResult<Option<Event>> {
        let mut events = self.events.write().await;

        if let Some(title) = &changes.title {
            if events.contains_key(&id) && title_taken(&events, title, Some(id)) {
                return Err(EventError::DuplicateTitle(title.clone()));
            }
        }

        let Some(event) = events.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(event);
        event.updated_at = Utc::now().max(event.updated_at);

        Ok(Some(event.clone()))
    }

    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let mut events = self.events.write().await;

        Ok(events.remove(&id).is_some())
    }

    async fn list(&self, skip: u64, limit: u64) -> EventResult<Vec<Event>> {
        let events = self.events.read().await;

        let mut result: Vec<Event> = events.values().cloned().collect();
        result.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(result.into_iter().skip(skip).take(limit).collect())
    }

    async fn count(&self) -> EventResult<i64> {
        let events = self.events.read().await;
        Ok(events.len() as i64)
    }
}
