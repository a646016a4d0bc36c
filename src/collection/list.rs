//! Ordered collection backed by an arena
//!
//! A doubly linked list whose nodes live in a `Vec` of slots. Links are slot
//! indices rather than pointers, and every [`Handle`] carries the slot's
//! generation so a handle to a removed node can never reach whatever reuses
//! the slot later.

use std::iter::FusedIterator;

/// Opaque reference to a node in an [`OrderedList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    slot: usize,
    generation: u64,
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
    linked: bool,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u64,
    node: Option<Node<T>>,
}

/// Insertion-ordered sequence with O(1) append, positional insert and detach
#[derive(Debug, Clone)]
pub struct OrderedList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of linked nodes (detached nodes are not counted)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert at the tail
    pub fn append(&mut self, value: T) -> Handle {
        let handle = self.alloc(value);
        self.link_between(handle.slot, self.tail, None);
        handle
    }

    /// Insert directly before `at`.
    ///
    /// Gives the value back if `at` is stale or not currently linked.
    pub fn insert_before(&mut self, at: Handle, value: T) -> Result<Handle, T> {
        let prev = match self.node(at) {
            Some(node) if node.linked => node.prev,
            _ => return Err(value),
        };
        let handle = self.alloc(value);
        self.link_between(handle.slot, prev, Some(at.slot));
        Ok(handle)
    }

    /// Insert directly after `at`.
    ///
    /// Gives the value back if `at` is stale or not currently linked.
    pub fn insert_after(&mut self, at: Handle, value: T) -> Result<Handle, T> {
        let next = match self.node(at) {
            Some(node) if node.linked => node.next,
            _ => return Err(value),
        };
        let handle = self.alloc(value);
        self.link_between(handle.slot, Some(at.slot), next);
        Ok(handle)
    }

    /// Unlink a node from the sequence, keeping it alive as an isolated node.
    ///
    /// Returns `false` if the handle is stale or already detached.
    pub fn detach(&mut self, handle: Handle) -> bool {
        let (prev, next) = match self.node(handle) {
            Some(node) if node.linked => (node.prev, node.next),
            _ => return false,
        };

        match prev {
            Some(p) => self.set_next(p, next),
            None => self.head = next,
        }
        match next {
            Some(n) => self.set_prev(n, prev),
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(handle) {
            node.prev = None;
            node.next = None;
            node.linked = false;
        }
        self.len -= 1;
        true
    }

    /// Detach (if needed) and free a node, returning its value
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        self.node(handle)?;
        self.detach(handle);

        let slot = &mut self.slots[handle.slot];
        let node = slot.node.take()?;
        slot.generation += 1;
        self.free.push(handle.slot);
        Some(node.value)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.node(handle).map(|node| &node.value)
    }

    /// Whether the handle points at a node that is part of the sequence
    pub fn is_linked(&self, handle: Handle) -> bool {
        self.node(handle).map(|node| node.linked).unwrap_or(false)
    }

    /// Iterate values in order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Iterate handles in order
    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let slot = cursor?;
            cursor = self.slots[slot].node.as_ref().and_then(|node| node.next);
            Some(self.handle_at(slot))
        })
    }

    /// The full sequence in current order
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    fn alloc(&mut self, value: T) -> Handle {
        let node = Node {
            value,
            prev: None,
            next: None,
            linked: false,
        };
        match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot];
                entry.node = Some(node);
                Handle {
                    slot,
                    generation: entry.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                Handle {
                    slot: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    fn link_between(&mut self, slot: usize, prev: Option<usize>, next: Option<usize>) {
        if let Some(node) = self.slots[slot].node.as_mut() {
            node.prev = prev;
            node.next = next;
            node.linked = true;
        }
        match prev {
            Some(p) => self.set_next(p, Some(slot)),
            None => self.head = Some(slot),
        }
        match next {
            Some(n) => self.set_prev(n, Some(slot)),
            None => self.tail = Some(slot),
        }
        self.len += 1;
    }

    fn set_next(&mut self, slot: usize, next: Option<usize>) {
        if let Some(node) = self.slots[slot].node.as_mut() {
            node.next = next;
        }
    }

    fn set_prev(&mut self, slot: usize, prev: Option<usize>) {
        if let Some(node) = self.slots[slot].node.as_mut() {
            node.prev = prev;
        }
    }

    fn handle_at(&self, slot: usize) -> Handle {
        Handle {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    fn node(&self, handle: Handle) -> Option<&Node<T>> {
        self.slots
            .get(handle.slot)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.node.as_ref())
    }

    fn node_mut(&mut self, handle: Handle) -> Option<&mut Node<T>> {
        self.slots
            .get_mut(handle.slot)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.node.as_mut())
    }
}

impl<T> FromIterator<T> for OrderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.append(value);
        }
        list
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`OrderedList`]
pub struct Iter<'a, T> {
    list: &'a OrderedList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let node = self.list.slots[slot].node.as_ref()?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(list: &OrderedList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut list = OrderedList::new();
        list.append("a");
        list.append("b");
        list.append("c");

        assert_eq!(values(&list), vec!["a", "b", "c"]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().len(), 3);
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut list = OrderedList::new();
        let a = list.append("a");
        let c = list.append("c");

        list.insert_after(a, "b").unwrap();
        list.insert_before(a, "start").unwrap();
        list.insert_after(c, "end").unwrap();

        assert_eq!(values(&list), vec!["start", "a", "b", "c", "end"]);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_detach_head_middle_tail() {
        let mut list: OrderedList<&str> = ["a", "b", "c", "d"].into_iter().collect();
        let handles: Vec<Handle> = list.handles().collect();

        assert!(list.detach(handles[1]));
        assert_eq!(values(&list), vec!["a", "c", "d"]);

        assert!(list.detach(handles[0]));
        assert!(list.detach(handles[3]));
        assert_eq!(values(&list), vec!["c"]);
        assert_eq!(list.handles().collect::<Vec<_>>(), vec![handles[2]]);

        // Detaching twice is a no-op
        assert!(!list.detach(handles[1]));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_detached_node_is_isolated() {
        let mut list: OrderedList<&str> = ["a", "b", "c"].into_iter().collect();
        let b = list.handles().nth(1).unwrap();

        list.detach(b);
        assert!(!list.is_linked(b));
        assert_eq!(list.get(b), Some(&"b"));
        assert_eq!(values(&list), vec!["a", "c"]);

        // Positional insert against a detached node is refused
        assert_eq!(list.insert_after(b, "x"), Err("x"));
        assert_eq!(list.insert_before(b, "y"), Err("y"));

        // Removing it frees the slot without touching the sequence
        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(values(&list), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_invalidates_handle() {
        let mut list = OrderedList::new();
        let a = list.append("a");
        list.append("b");

        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.get(a), None);
        assert!(!list.detach(a));

        // The freed slot is reused, but the stale handle still misses
        let c = list.append("c");
        assert_ne!(a, c);
        assert_eq!(list.get(a), None);
        assert_eq!(list.remove(a), None);
        assert_eq!(values(&list), vec!["b", "c"]);
    }

    #[test]
    fn test_replace_in_place() {
        let mut list: OrderedList<&str> = ["a", "b", "c"].into_iter().collect();
        let b = list.handles().nth(1).unwrap();

        let b2 = list.insert_after(b, "B").unwrap();
        list.remove(b);

        assert_eq!(values(&list), vec!["a", "B", "c"]);
        assert_eq!(list.handles().nth(1), Some(b2));
        assert_eq!(list.iter().len(), 3);
    }
}
