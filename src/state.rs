use std::sync::Arc;

use crate::auth::{JwtKeys, RoleGate, EVENT_MANAGERS};
use crate::config::Config;
use crate::repository::EventRepository;
use crate::services::EventService;

/// Everything a request handler may reach, built once in `main`.
pub struct AppState<R: EventRepository> {
    pub events: EventService<R>,
    pub config: Arc<Config>,
    pub event_gate: RoleGate,
}

impl<R: EventRepository> AppState<R> {
    pub fn new(events: EventService<R>, config: Arc<Config>) -> Self {
        let keys = Arc::new(JwtKeys::from_secret(&config.jwt_secret));

        Self {
            events,
            event_gate: RoleGate::new(keys, EVENT_MANAGERS),
            config,
        }
    }
}

impl<R: EventRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            config: Arc::clone(&self.config),
            event_gate: self.event_gate.clone(),
        }
    }
}
