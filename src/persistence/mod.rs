//! Persistence gateway
//!
//! Durable load/save of whole JSON documents, with corruption backup and
//! atomic replace. Used for both `events.json` and `appConfig.json`.

mod documents;
mod error;
mod json_file;

pub use documents::{decode_config, decode_events};
pub use error::{ErrorCode, FileKind, StoreError, StoreResult};
pub use json_file::JsonFile;
