use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::Event;
use crate::schemas::{datetime, present};

pub const CREATEDBY_MAX_LEN: usize = 100;

fn default_limit() -> u64 {
    10
}

/// Body of `POST /events/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct EventCreate {
    #[validate(
        required(message = "title is required"),
        length(min = 1, max = 100)
    )]
    #[serde(default)]
    pub title: Option<String>,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub createdby: Option<String>,
    #[serde(default, with = "datetime::optional")]
    pub startdate: Option<DateTime<Utc>>,
    #[serde(default, with = "datetime::optional")]
    pub enddate: Option<DateTime<Utc>>,
}

/// Body of `PUT /events/:id`.
///
/// An absent field leaves the stored value untouched. For the nullable
/// columns an explicit `null` clears the value; `title` can never be null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[validate(schema(function = "validate_update_createdby"))]
pub struct EventUpdate {
    #[validate(length(min = 1, max = 100))]
    #[serde(default, deserialize_with = "present")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub createdby: Option<Option<String>>,
    #[serde(default, deserialize_with = "datetime::nullable")]
    pub startdate: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "datetime::nullable")]
    pub enddate: Option<Option<DateTime<Utc>>>,
}

fn validate_update_createdby(update: &EventUpdate) -> Result<(), ValidationError> {
    match &update.createdby {
        Some(Some(name)) if name.chars().count() > CREATEDBY_MAX_LEN => {
            let mut err = ValidationError::new("length");
            err.message = Some("createdby must be at most 100 characters".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl EventUpdate {
    /// Writes the supplied fields onto `event`, leaving the rest alone.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(createdby) = &self.createdby {
            event.createdby = createdby.clone();
        }
        if let Some(startdate) = self.startdate {
            event.startdate = startdate;
        }
        if let Some(enddate) = self.enddate {
            event.enddate = enddate;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub createdby: Option<String>,
    #[serde(with = "datetime::optional")]
    pub startdate: Option<DateTime<Utc>>,
    #[serde(with = "datetime::optional")]
    pub enddate: Option<DateTime<Utc>>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            createdby: event.createdby,
            startdate: event.startdate,
            enddate: event.enddate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventListResponse {
    pub items: Vec<EventResponse>,
    pub total: i64,
    pub page: u64,
    pub size: usize,
}

impl EventListResponse {
    pub fn new(events: Vec<Event>, total: i64, params: &ListParams) -> Self {
        let items: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
        let size = items.len();

        Self {
            items,
            total,
            page: params.page(),
            size,
        }
    }
}

/// Query string of `GET /events/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl ListParams {
    /// 1-based page number. A zero limit has no pages, so it reports page 1.
    pub fn page(&self) -> u64 {
        if self.limit == 0 {
            1
        } else {
            self.skip / self.limit + 1
        }
    }
}
