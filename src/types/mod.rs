//! Data types for the event store
//!
//! This module contains the event model, its on-disk wire form and the
//! application configuration document.

mod app_config;
mod event;
mod wire;

pub use app_config::AppConfig;
pub use event::{
    compare_newest_first, sort_newest_first, Event, EventId, EventPatch, DEFAULT_TITLE,
};
pub use wire::{decode_timestamp, WireEvent};
