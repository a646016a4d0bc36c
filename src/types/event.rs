//! Event record model
//!
//! `Event` is the in-memory form of a to-do item. `EventPatch` is what
//! callers hand to the store to create or update one.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::utils::timestamp_from_millis;

/// Event identifier: creation time in epoch milliseconds, made unique by the store
pub type EventId = i64;

/// Title given to records that arrive without one
pub const DEFAULT_TITLE: &str = "Unknown";

/// An event (to-do item) held by the store
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub desc: Option<String>,
    pub complete: bool,
    pub important: Option<bool>,
    pub deadline: Option<DateTime<Utc>>,
    pub reminder_time: Option<DateTime<Utc>>,
}

impl Event {
    /// Create a new event with default values
    pub fn new(id: EventId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            desc: None,
            complete: false,
            important: None,
            deadline: None,
            reminder_time: None,
        }
    }

    /// Build a fresh record from a patch; unspecified fields take their defaults.
    pub fn from_patch(id: EventId, patch: EventPatch) -> Self {
        Self::new(id, DEFAULT_TITLE.to_string()).merged(patch)
    }

    /// Return a copy of this record with the patch applied.
    ///
    /// Supplied fields override, everything else keeps its prior value.
    /// The id never changes.
    pub fn merged(&self, patch: EventPatch) -> Self {
        let mut next = self.clone();
        next.title = patch.title;
        if let Some(desc) = patch.desc {
            next.desc = desc;
        }
        if let Some(complete) = patch.complete {
            next.complete = complete;
        }
        if let Some(important) = patch.important {
            next.important = Some(important);
        }
        if let Some(deadline) = patch.deadline {
            next.deadline = deadline;
        }
        if let Some(reminder_time) = patch.reminder_time {
            next.reminder_time = reminder_time;
        }
        next
    }

    /// Whether the event is flagged important (unset counts as not important)
    pub fn is_important(&self) -> bool {
        self.important.unwrap_or(false)
    }
}

/// Partial event with a required title.
///
/// `None` leaves a field untouched. The nullable fields (`desc`, `deadline`,
/// `reminder_time`) use `Some(None)` to clear the value; over JSON that is
/// an explicit `null`, while a missing key means "retain".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub title: String,
    #[serde(default, deserialize_with = "double_option")]
    pub desc: Option<Option<String>>,
    #[serde(default)]
    pub complete: Option<bool>,
    #[serde(default)]
    pub important: Option<bool>,
    #[serde(default, deserialize_with = "double_option_millis")]
    pub deadline: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option_millis")]
    pub reminder_time: Option<Option<DateTime<Utc>>>,
}

impl EventPatch {
    /// Patch that only sets the title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            desc: None,
            complete: None,
            important: None,
            deadline: None,
            reminder_time: None,
        }
    }

    pub fn desc(mut self, desc: Option<String>) -> Self {
        self.desc = Some(desc);
        self
    }

    pub fn complete(mut self, complete: bool) -> Self {
        self.complete = Some(complete);
        self
    }

    pub fn important(mut self, important: bool) -> Self {
        self.important = Some(important);
        self
    }

    pub fn deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn reminder_time(mut self, reminder_time: Option<DateTime<Utc>>) -> Self {
        self.reminder_time = Some(reminder_time);
        self
    }
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Epoch milliseconds in a patch. `null`, `0` and out-of-range values clear
/// the field, the same values that read back as "no value" from the file.
fn double_option_millis<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = Option::<i64>::deserialize(deserializer)?;
    Ok(Some(millis.and_then(timestamp_from_millis)))
}

/// Newest first (descending id), the order lists are presented in
pub fn compare_newest_first(a: &Event, b: &Event) -> Ordering {
    b.id.cmp(&a.id)
}

/// Sort events newest first
pub fn sort_newest_first(events: &mut [Event]) {
    events.sort_by(compare_newest_first);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_patch_defaults() {
        let event = Event::from_patch(42, EventPatch::new("x"));

        assert_eq!(event.id, 42);
        assert_eq!(event.title, "x");
        assert!(!event.complete);
        assert!(event.desc.is_none());
        assert!(event.important.is_none());
        assert!(event.deadline.is_none());
        assert!(event.reminder_time.is_none());
    }

    #[test]
    fn test_merged_retains_unspecified_fields() {
        let deadline = timestamp_from_millis(1_700_000_000_000);
        let original = Event::from_patch(
            1,
            EventPatch::new("Buy milk")
                .desc(Some("2 litres".to_string()))
                .important(true)
                .deadline(deadline),
        );

        let updated = original.merged(EventPatch::new("Buy oat milk").complete(true));

        assert_eq!(updated.id, 1);
        assert_eq!(updated.title, "Buy oat milk");
        assert_eq!(updated.desc.as_deref(), Some("2 litres"));
        assert!(updated.complete);
        assert!(updated.is_important());
        assert_eq!(updated.deadline, deadline);
    }

    #[test]
    fn test_merged_clears_nullable_fields() {
        let original = Event::from_patch(
            1,
            EventPatch::new("a")
                .desc(Some("d".to_string()))
                .reminder_time(timestamp_from_millis(1_000)),
        );

        let updated = original.merged(EventPatch::new("a").desc(None).reminder_time(None));

        assert!(updated.desc.is_none());
        assert!(updated.reminder_time.is_none());
    }

    #[test]
    fn test_patch_json_null_clears_missing_retains() {
        let patch: EventPatch = serde_json::from_value(json!({
            "title": "t",
            "desc": null,
            "deadline": 1700000000000i64
        }))
        .unwrap();

        assert_eq!(patch.desc, Some(None));
        assert_eq!(patch.reminder_time, None);
        assert_eq!(patch.deadline, Some(timestamp_from_millis(1_700_000_000_000)));
        assert_eq!(patch.complete, None);
    }

    #[test]
    fn test_patch_requires_title() {
        let result = serde_json::from_value::<EventPatch>(json!({ "desc": "no title" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_zero_timestamp_clears() {
        let patch: EventPatch =
            serde_json::from_value(json!({ "title": "t", "deadline": 0 })).unwrap();
        assert_eq!(patch.deadline, Some(None));
        assert_eq!(patch.reminder_time, None);

        let patch: EventPatch =
            serde_json::from_value(json!({ "title": "t", "reminderTime": -9_000_000_000_000_000i64 }))
                .unwrap();
        assert_eq!(patch.reminder_time, Some(None));
    }

    #[test]
    fn test_patch_rejects_non_numeric_timestamp() {
        let result = serde_json::from_value::<EventPatch>(json!({ "title": "t", "deadline": "soon" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_sort_newest_first() {
        let mut events = vec![Event::new(1, "a"), Event::new(3, "c"), Event::new(2, "b")];
        sort_newest_first(&mut events);
        let ids: Vec<EventId> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
