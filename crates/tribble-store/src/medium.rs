use std::path::Path;

use crate::error::StoreResult;

/// Raw byte storage underneath the framed store.
///
/// Implementations must release any handle they open before returning, on
/// success and on error alike. No method interprets the bytes it moves.
pub trait StorageMedium: Send + Sync {
    /// Open for append (creating if absent) and write `bytes` at the end.
    fn append(&self, path: &Path, bytes: &[u8]) -> StoreResult<()>;

    /// Open for write (creating if absent, truncating otherwise) and write `bytes`.
    fn overwrite(&self, path: &Path, bytes: &[u8]) -> StoreResult<()>;

    /// Read the whole file.
    fn read_all(&self, path: &Path) -> StoreResult<Vec<u8>>;

    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents.
    fn create_dir_all(&self, path: &Path) -> StoreResult<()>;
}
