use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use tribble_frame::{decode, encode, Frames};

use crate::config::StoreConfig;
use crate::disk::DiskMedium;
use crate::error::{StoreError, StoreResult};
use crate::medium::StorageMedium;

/// How a write lands in the target file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Add a frame after the existing content.
    Append,
    /// Replace the whole file with a single frame.
    Overwrite,
}

impl WriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WriteMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "append" => Ok(Self::Append),
            "overwrite" => Ok(Self::Overwrite),
            _ => Err(StoreError::UnknownWriteMode(s.to_string())),
        }
    }
}

/// Length-prefixed record storage over a [`StorageMedium`].
///
/// Stateless between calls: nothing is cached, every read goes back to the
/// medium. Paths are resolved against [`StoreConfig::root`].
///
/// Concurrent writers to the same path can interleave frames. Callers that
/// share a path across threads or processes must serialize access themselves.
pub struct FramedFileStore<M: StorageMedium = DiskMedium> {
    config: StoreConfig,
    medium: M,
}

impl FramedFileStore<DiskMedium> {
    /// Create a store over the local filesystem.
    pub fn new(config: StoreConfig) -> Self {
        let medium = DiskMedium::new(config.sync);
        Self { config, medium }
    }
}

impl<M: StorageMedium> FramedFileStore<M> {
    /// Create a store over an explicit medium.
    pub fn with_medium(config: StoreConfig, medium: M) -> Self {
        Self { config, medium }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The underlying medium, for callers that need unframed access to the
    /// same files.
    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Resolve `path` against the configured root. Absolute paths pass through.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.config.root.join(path)
    }

    /// Encode `payload` and write it to `path` according to `mode`.
    ///
    /// The payload is encoded before the file is opened, so an oversized
    /// payload leaves the file untouched.
    pub fn write(
        &self,
        path: impl AsRef<Path>,
        mode: WriteMode,
        payload: &[u8],
    ) -> StoreResult<()> {
        let path = self.resolve(path);
        let frame = encode(payload)?;

        if self.config.create_parents {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                self.medium.create_dir_all(parent)?;
            }
        }

        match mode {
            WriteMode::Append => self.medium.append(&path, &frame)?,
            WriteMode::Overwrite => self.medium.overwrite(&path, &frame)?,
        }

        debug!(path = %path.display(), %mode, payload_len = payload.len(), "frame written");
        Ok(())
    }

    /// Append one frame to `path`.
    pub fn append(&self, path: impl AsRef<Path>, payload: &[u8]) -> StoreResult<()> {
        self.write(path, WriteMode::Append, payload)
    }

    /// Replace `path` with a single frame.
    pub fn overwrite(&self, path: impl AsRef<Path>, payload: &[u8]) -> StoreResult<()> {
        self.write(path, WriteMode::Overwrite, payload)
    }

    /// Read `path` and decode the first frame.
    ///
    /// Frames after the first are ignored; use [`read_all`](Self::read_all)
    /// or step through [`read_raw`](Self::read_raw) with
    /// [`tribble_frame::decode_frame`] to reach them.
    pub fn read(&self, path: impl AsRef<Path>) -> StoreResult<Vec<u8>> {
        let path = self.resolve(path);
        let content = self.medium.read_all(&path)?;
        match decode(&content) {
            Ok(payload) => Ok(payload.to_vec()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed leading frame");
                Err(e.into())
            }
        }
    }

    /// Read and decode every frame in `path`, in write order.
    ///
    /// An empty file yields no frames. The first malformed frame aborts the
    /// read with its error.
    pub fn read_all(&self, path: impl AsRef<Path>) -> StoreResult<Vec<Vec<u8>>> {
        let path = self.resolve(path);
        let content = self.medium.read_all(&path)?;

        let mut payloads = Vec::new();
        let mut frames = Frames::new(&content);
        while let Some(frame) = frames.next() {
            match frame {
                Ok(payload) => payloads.push(payload.to_vec()),
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        offset = frames.offset(),
                        error = %e,
                        "malformed frame"
                    );
                    return Err(e.into());
                }
            }
        }

        debug!(path = %path.display(), frames = payloads.len(), "read all frames");
        Ok(payloads)
    }

    /// Read the raw, still-framed bytes of `path`.
    pub fn read_raw(&self, path: impl AsRef<Path>) -> StoreResult<Vec<u8>> {
        self.medium.read_all(&self.resolve(path))
    }

    /// Whether `path` exists on the medium.
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.medium.exists(&self.resolve(path))
    }
}

impl<M: StorageMedium + fmt::Debug> fmt::Debug for FramedFileStore<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FramedFileStore")
            .field("config", &self.config)
            .field("medium", &self.medium)
            .finish()
    }
}
