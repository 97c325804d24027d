//! Framed file storage for tribble.
//!
//! Binds the `tribble-frame` codec to paths on a storage medium. A file is a
//! sequence of length-prefixed frames that grows by [`WriteMode::Append`] or
//! is replaced wholesale by [`WriteMode::Overwrite`].
//!
//! # Storage Media
//!
//! All raw file access goes through the [`StorageMedium`] trait:
//!
//! - [`DiskMedium`] -- `std::fs` backed, one open handle per call
//! - [`InMemoryMedium`] -- `HashMap` backed, for tests and embedding
//!
//! # Design Rules
//!
//! 1. The store holds no state between calls beyond its configuration.
//! 2. Every call opens, uses, and releases its file handle before returning.
//! 3. Append never touches bytes already written.
//! 4. Overwrite leaves exactly one frame in the file.
//! 5. Corrupt files are reported, never repaired.
//! 6. One writer per path at a time; callers own any locking.

pub mod config;
pub mod disk;
pub mod error;
pub mod medium;
pub mod memory;
pub mod store;

pub use config::{StoreConfig, SyncMode};
pub use disk::DiskMedium;
pub use error::{StoreError, StoreResult};
pub use medium::StorageMedium;
pub use memory::InMemoryMedium;
pub use store::{FramedFileStore, WriteMode};

pub use tribble_frame::{FrameError, PREFIX_WIDTH};
