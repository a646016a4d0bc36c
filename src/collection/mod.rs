//! In-memory structures behind the event store
//!
//! - `OrderedList`: arena-backed doubly linked list addressed by `Handle`s
//! - `IdIndex`: event id → handle lookup

mod index;
mod list;

pub use index::IdIndex;
pub use list::{Handle, Iter, OrderedList};
