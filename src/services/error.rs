use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Event with title '{0}' already exists")]
    DuplicateTitle(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type EventResult<T> = Result<T, EventError>;
