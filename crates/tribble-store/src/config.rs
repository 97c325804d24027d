use std::path::PathBuf;

/// Flush strategy after each write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// `fsync` after every write before the handle is released.
    EveryWrite,
    /// Rely on OS page-cache buffering.
    #[default]
    OsDefault,
}

/// Configuration for a [`FramedFileStore`](crate::FramedFileStore).
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Directory that relative paths are resolved against.
    pub root: PathBuf,
    /// Sync strategy applied to every write.
    pub sync: SyncMode,
    /// Create missing parent directories before writing.
    pub create_parents: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            sync: SyncMode::default(),
            create_parents: false,
        }
    }
}

impl StoreConfig {
    /// Default configuration rooted at `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}
