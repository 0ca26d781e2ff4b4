// Shared helpers for driving the router in-process.

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use events_server::auth::JwtKeys;
use events_server::config::Config;
use events_server::repository::InMemoryEventRepository;
use events_server::routes::create_routes;
use events_server::services::EventService;
use events_server::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    router: Router,
    keys: JwtKeys,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Config::from_lookup(|key| match key {
            "JWT_SECRET" => Some(TEST_SECRET.to_string()),
            _ => None,
        })
        .expect("Failed to build test config");

        let events = EventService::new(InMemoryEventRepository::new());
        let router = create_routes(AppState::new(events, Arc::new(config)));

        Self {
            router,
            keys: JwtKeys::from_secret(TEST_SECRET),
        }
    }

    pub fn token(&self, role: &str) -> String {
        self.keys
            .issue(&format!("{}@example.com", role.to_lowercase()), role, Duration::minutes(30))
            .expect("Failed to issue token")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// GET with a verbatim `Authorization` header value.
    pub async fn get_with_authorization(&self, uri: &str, authorization: &str) -> Response<Body> {
        let request = Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, authorization)
            .body(Body::empty())
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
