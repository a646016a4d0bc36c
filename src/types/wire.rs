//! Wire form of events, as stored in `events.json`
//!
//! Identical to [`Event`] except that `deadline`/`reminderTime` are epoch
//! millisecond integers. Decoding is forgiving: anything in a timestamp
//! field that is not a usable point in time reads back as "no value", and
//! `null` in any field means the same as leaving it out.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use chrono::{DateTime, Utc};

use super::event::{Event, EventId, DEFAULT_TITLE};
use crate::utils::{timestamp_from_millis, timestamp_from_millis_f64, timestamp_to_millis};

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// JSON-serializable event record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEvent {
    /// Missing ids (and `0`) are filled in when the record is hydrated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    #[serde(default = "default_title", deserialize_with = "nullable_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub important: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub reminder_time: Option<i64>,
}

impl WireEvent {
    /// The record's id, unless it is missing or `0`
    pub fn stored_id(&self) -> Option<EventId> {
        self.id.filter(|id| *id != 0)
    }

    /// Convert to the in-memory form, calling `fallback_id` if the record has no id.
    pub fn into_event(self, fallback_id: impl FnOnce() -> EventId) -> Event {
        Event {
            id: self.stored_id().unwrap_or_else(fallback_id),
            title: self.title,
            desc: self.desc,
            complete: self.complete,
            important: self.important,
            deadline: self.deadline.and_then(timestamp_from_millis),
            reminder_time: self.reminder_time.and_then(timestamp_from_millis),
        }
    }
}

impl From<&Event> for WireEvent {
    fn from(event: &Event) -> Self {
        Self {
            id: Some(event.id),
            title: event.title.clone(),
            desc: event.desc.clone(),
            complete: event.complete,
            important: event.important,
            deadline: event.deadline.as_ref().map(timestamp_to_millis),
            reminder_time: event.reminder_time.as_ref().map(timestamp_to_millis),
        }
    }
}

/// Decode a stored timestamp value.
///
/// `null`, strings, booleans, NaN, zero and out-of-range numbers are all
/// "no value".
pub fn decode_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(millis) => timestamp_from_millis(millis),
            None => n.as_f64().and_then(timestamp_from_millis_f64),
        },
        _ => None,
    }
}

/// `null` decodes as the type's default
pub(crate) fn null_as_default<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Deserialize<'de> + Default,
    D: Deserializer<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_title))
}

fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(decode_timestamp)
        .map(|ts| timestamp_to_millis(&ts)))
}
