use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::auth::require_role;
use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::events::{create_event, delete_event, get_event, list_events, update_event};
use crate::handlers::health_check;
use crate::repository::EventRepository;
use crate::state::AppState;

pub fn create_routes<R: EventRepository + 'static>(state: AppState<R>) -> Router {
    let event_routes = Router::new()
        .route("/events/", get(list_events).post(create_event))
        .route(
            "/events/:event_id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route_layer(middleware::from_fn_with_state(
            state.event_gate.clone(),
            require_role,
        ))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health_check))
        .merge(event_routes)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(&state.config))
        .layer(create_cors_layer(&state.config))
}
