//! Id index: event id → node handle in the ordered list

use std::collections::HashMap;

use super::list::Handle;
use crate::types::EventId;

/// Key → handle mapping kept in lockstep with an [`OrderedList`](super::OrderedList).
///
/// Not synchronized; the owner serializes access.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    map: HashMap<EventId, Handle>,
}

impl IdIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `id` to `handle`, returning the handle it replaced
    pub fn set(&mut self, id: EventId, handle: Handle) -> Option<Handle> {
        self.map.insert(id, handle)
    }

    pub fn get(&self, id: EventId) -> Option<Handle> {
        self.map.get(&id).copied()
    }

    /// Remove `id`, returning the handle it pointed at
    pub fn delete(&mut self, id: EventId) -> Option<Handle> {
        self.map.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All `(id, handle)` pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (EventId, Handle)> + '_ {
        self.map.iter().map(|(id, handle)| (*id, *handle))
    }
}
