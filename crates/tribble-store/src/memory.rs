use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::medium::StorageMedium;

/// In-memory, HashMap-based storage medium.
///
/// Intended for tests and embedding. File contents live behind a `RwLock`;
/// parent directories are not enforced.
pub struct InMemoryMedium {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    dirs: RwLock<HashSet<PathBuf>>,
}

impl InMemoryMedium {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            dirs: RwLock::new(HashSet::new()),
        }
    }

    /// Number of files currently held.
    pub fn len(&self) -> usize {
        self.files.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().expect("lock poisoned").is_empty()
    }

    /// Replace a file's raw bytes, bypassing framing. Useful for simulating
    /// corruption.
    pub fn set_raw(&self, path: &Path, bytes: Vec<u8>) {
        self.files
            .write()
            .expect("lock poisoned")
            .insert(path.to_path_buf(), bytes);
    }
}

impl Default for InMemoryMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageMedium for InMemoryMedium {
    fn append(&self, path: &Path, bytes: &[u8]) -> StoreResult<()> {
        let mut files = self.files.write().expect("lock poisoned");
        files
            .entry(path.to_path_buf())
            .or_default()
            .extend_from_slice(bytes);
        Ok(())
    }

    fn overwrite(&self, path: &Path, bytes: &[u8]) -> StoreResult<()> {
        let mut files = self.files.write().expect("lock poisoned");
        files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn read_all(&self, path: &Path) -> StoreResult<Vec<u8>> {
        let files = self.files.read().expect("lock poisoned");
        files.get(path).cloned().ok_or_else(|| {
            StoreError::io(
                path,
                io::Error::new(io::ErrorKind::NotFound, "no such file"),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().expect("lock poisoned").contains_key(path)
            || self.dirs.read().expect("lock poisoned").contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> StoreResult<()> {
        let mut dirs = self.dirs.write().expect("lock poisoned");
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryMedium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryMedium")
            .field("file_count", &self.len())
            .finish()
    }
}
