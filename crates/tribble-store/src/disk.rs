use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::config::SyncMode;
use crate::error::{StoreError, StoreResult};
use crate::medium::StorageMedium;

/// Permission bits for newly created files on unix.
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Local filesystem medium.
///
/// Every call opens its own handle and drops it before returning, so no
/// descriptor outlives a call on any path.
#[derive(Clone, Debug, Default)]
pub struct DiskMedium {
    sync: SyncMode,
}

impl DiskMedium {
    pub fn new(sync: SyncMode) -> Self {
        Self { sync }
    }

    fn write_options() -> OpenOptions {
        let mut opts = OpenOptions::new();
        opts.write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(FILE_MODE);
        }
        opts
    }

    fn write_to(&self, mut file: File, path: &Path, bytes: &[u8]) -> StoreResult<()> {
        file.write_all(bytes)
            .map_err(|e| StoreError::io(path, e))?;
        if matches!(self.sync, SyncMode::EveryWrite) {
            file.sync_all().map_err(|e| StoreError::io(path, e))?;
        }
        Ok(())
    }
}

impl StorageMedium for DiskMedium {
    fn append(&self, path: &Path, bytes: &[u8]) -> StoreResult<()> {
        let file = Self::write_options()
            .append(true)
            .open(path)
            .map_err(|e| StoreError::io(path, e))?;
        self.write_to(file, path, bytes)?;
        debug!(path = %path.display(), len = bytes.len(), "appended");
        Ok(())
    }

    fn overwrite(&self, path: &Path, bytes: &[u8]) -> StoreResult<()> {
        let file = Self::write_options()
            .truncate(true)
            .open(path)
            .map_err(|e| StoreError::io(path, e))?;
        self.write_to(file, path, bytes)?;
        debug!(path = %path.display(), len = bytes.len(), "overwrote");
        Ok(())
    }

    fn read_all(&self, path: &Path) -> StoreResult<Vec<u8>> {
        let mut file = File::open(path).map_err(|e| StoreError::io(path, e))?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| StoreError::io(path, e))?;
        Ok(content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> StoreResult<()> {
        fs::create_dir_all(path).map_err(|e| StoreError::io(path, e))
    }
}
