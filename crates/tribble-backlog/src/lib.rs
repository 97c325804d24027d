//! Backlog management for tribble.
//!
//! Serializes [`BacklogEntry`] values into payloads, logs them to a framed
//! backlog file with append, and replays them in write order. Also owns the
//! tool's [`Config`], which is a plain (unframed) JSON document bootstrapped
//! under `.tribble/` on first use.

pub mod backlog;
pub mod config;
pub mod entry;
pub mod error;

pub use backlog::Backlog;
pub use config::{init_folders, Config, EntryFormat, CONFIG_FILE, DEFAULT_BACKLOG_PATH, TRIBBLE_DIR};
pub use entry::{BacklogEntry, EntryStatus};
pub use error::{BacklogError, BacklogResult};
