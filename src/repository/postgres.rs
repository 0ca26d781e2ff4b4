use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Event, NewEvent};
use crate::repository::EventRepository;
use crate::schemas::EventUpdate;
use crate::services::{EventError, EventResult};

const EVENT_COLUMNS: &str = "id, title, createdby, startdate, enddate, created_at, updated_at";

#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violations on `events.title` become a conflict; anything else is a
/// store failure.
fn map_write_error(err: sqlx::Error, title: &str) -> EventError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            EventError::DuplicateTitle(title.to_string())
        }
        _ => EventError::Database(err),
    }
}

fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, input: NewEvent) -> EventResult<Event> {
        let query = format!(
            "INSERT INTO events (title, createdby, startdate, enddate) \
             VALUES ($1, $2, $3, $4) RETURNING {EVENT_COLUMNS}"
        );

        let event = sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.createdby)
            .bind(input.startdate)
            .bind(input.enddate)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &input.title))?;

        Ok(event)
    }

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");

        let event = sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    async fn update(&self, id: Uuid, changes: EventUpdate) -> EventResult<Option<Event>> {
        // Rolled back on drop unless committed below.
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 FOR UPDATE");
        let existing = sqlx::query_as::<_, Event>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut event) = existing else {
            return Ok(None);
        };
        changes.apply_to(&mut event);

        let update = format!(
            "UPDATE events \
             SET title = $2, createdby = $3, startdate = $4, enddate = $5, updated_at = NOW() \
             WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Event>(&update)
            .bind(id)
            .bind(&event.title)
            .bind(&event.createdby)
            .bind(event.startdate)
            .bind(event.enddate)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, &event.title))?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, skip: u64, limit: u64) -> EventResult<Vec<Event>> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at, id LIMIT $1 OFFSET $2"
        );

        let events = sqlx::query_as::<_, Event>(&query)
            .bind(to_sql_bound(limit))
            .bind(to_sql_bound(skip))
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn count(&self) -> EventResult<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_store_failures() {
        let err = map_write_error(sqlx::Error::PoolTimedOut, "Sample Event");
        assert!(matches!(err, EventError::Database(sqlx::Error::PoolTimedOut)));
    }

    #[test]
    fn test_sql_bounds_saturate() {
        assert_eq!(to_sql_bound(10), 10);
        assert_eq!(to_sql_bound(u64::MAX), i64::MAX);
    }
}
