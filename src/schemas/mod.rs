pub mod datetime;
pub mod event;

use serde::{Deserialize, Deserializer};

pub use event::{EventCreate, EventListResponse, EventResponse, EventUpdate, ListParams};

/// Marks a field as present whenever its key appears in the body, so that
/// `Option<T>` means "absent" and the inner `T` carries the value (or `null`
/// when `T` is itself an `Option`).
pub(crate) fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
