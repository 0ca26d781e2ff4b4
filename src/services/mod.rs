pub mod error;
pub mod event_service;

pub use error::{EventError, EventResult};
pub use event_service::EventService;
