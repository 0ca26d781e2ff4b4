//! Event management endpoints. Every handler here sits behind the
//! ADMIN/MANAGER role gate installed in [`crate::routes`].

use axum::{extract::State, response::Response, Json};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::repository::EventRepository;
use crate::schemas::{EventCreate, EventListResponse, EventResponse, EventUpdate, ListParams};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{ApiJson, ApiPath, ApiQuery};
use crate::utils::response::no_content;

fn event_not_found() -> AppError {
    AppError::NotFound("Event not found".to_string())
}

pub async fn get_event<R: EventRepository>(
    State(state): State<AppState<R>>,
    ApiPath(event_id): ApiPath<Uuid>,
) -> Result<Json<EventResponse>, AppError> {
    let event = state
        .events
        .get_by_id(event_id)
        .await?
        .ok_or_else(event_not_found)?;

    Ok(Json(event.into()))
}

pub async fn create_event<R: EventRepository>(
    State(state): State<AppState<R>>,
    user: CurrentUser,
    ApiJson(input): ApiJson<EventCreate>,
) -> Result<Json<EventResponse>, AppError> {
    let event = state.events.create(input).await?;

    tracing::info!(event_id = %event.id, subject = %user.subject, "Event created");
    Ok(Json(event.into()))
}

pub async fn update_event<R: EventRepository>(
    State(state): State<AppState<R>>,
    user: CurrentUser,
    ApiPath(event_id): ApiPath<Uuid>,
    ApiJson(changes): ApiJson<EventUpdate>,
) -> Result<Json<EventResponse>, AppError> {
    let event = state
        .events
        .update(event_id, changes)
        .await?
        .ok_or_else(event_not_found)?;

    tracing::info!(event_id = %event.id, subject = %user.subject, "Event updated");
    Ok(Json(event.into()))
}

pub async fn delete_event<R: EventRepository>(
    State(state): State<AppState<R>>,
    user: CurrentUser,
    ApiPath(event_id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    if !state.events.delete(event_id).await? {
        return Err(event_not_found());
    }

    tracing::info!(%event_id, subject = %user.subject, "Event deleted");
    Ok(no_content())
}

pub async fn list_events<R: EventRepository>(
    State(state): State<AppState<R>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<EventListResponse>, AppError> {
    let page = state.events.page(params).await?;
    Ok(Json(page))
}
