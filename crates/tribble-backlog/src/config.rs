use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tribble_store::StorageMedium;

use crate::entry::BacklogEntry;
use crate::error::{BacklogError, BacklogResult};

/// Directory holding tribble's own files, relative to the project root.
pub const TRIBBLE_DIR: &str = ".tribble";

/// Config file name inside [`TRIBBLE_DIR`].
pub const CONFIG_FILE: &str = "tribble.cfg";

/// Default backlog file, relative to the project root.
pub const DEFAULT_BACKLOG_PATH: &str = ".backlog";

/// How backlog entries are serialized into frame payloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryFormat {
    #[default]
    Json,
    Binary,
}

impl EntryFormat {
    pub fn encode(&self, entry: &BacklogEntry) -> BacklogResult<Vec<u8>> {
        match self {
            Self::Json => serde_json::to_vec(entry)
                .map_err(|e| BacklogError::Serialization(e.to_string())),
            Self::Binary => {
                bincode::serialize(entry).map_err(|e| BacklogError::Serialization(e.to_string()))
            }
        }
    }

    pub fn decode(&self, payload: &[u8]) -> BacklogResult<BacklogEntry> {
        match self {
            Self::Json => serde_json::from_slice(payload)
                .map_err(|e| BacklogError::Serialization(e.to_string())),
            Self::Binary => bincode::deserialize(payload)
                .map_err(|e| BacklogError::Serialization(e.to_string())),
        }
    }
}

/// Tool configuration, persisted as pretty JSON at `.tribble/tribble.cfg`.
///
/// Passed around explicitly; there is no process-wide instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Framed backlog file, relative to the project root unless absolute.
    pub backlog_path: PathBuf,
    /// Payload encoding for backlog entries.
    pub entry_format: EntryFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backlog_path: PathBuf::from(DEFAULT_BACKLOG_PATH),
            entry_format: EntryFormat::default(),
        }
    }
}

impl Config {
    /// `<root>/.tribble`
    pub fn tribble_dir(root: &Path) -> PathBuf {
        root.join(TRIBBLE_DIR)
    }

    /// `<root>/.tribble/tribble.cfg`
    pub fn config_path(root: &Path) -> PathBuf {
        Self::tribble_dir(root).join(CONFIG_FILE)
    }

    /// Load the config under `root`, creating `.tribble/` and a default
    /// config file first if they are missing.
    pub fn load_or_init<M: StorageMedium>(medium: &M, root: &Path) -> BacklogResult<Self> {
        init_folders(medium, &[Self::tribble_dir(root)])?;

        let path = Self::config_path(root);
        if !medium.exists(&path) {
            info!(path = %path.display(), "no config file found; writing defaults");
            Self::default().save(medium, root)?;
        }

        Self::load(medium, root)
    }

    /// Load the config under `root`. Fails if it does not exist.
    pub fn load<M: StorageMedium>(medium: &M, root: &Path) -> BacklogResult<Self> {
        let path = Self::config_path(root);
        let raw = medium.read_all(&path)?;
        serde_json::from_slice(&raw).map_err(|e| BacklogError::Config {
            path,
            reason: e.to_string(),
        })
    }

    /// Write the whole config file, replacing what was there. Unframed.
    pub fn save<M: StorageMedium>(&self, medium: &M, root: &Path) -> BacklogResult<()> {
        let path = Self::config_path(root);
        let raw = serde_json::to_vec_pretty(self)
            .map_err(|e| BacklogError::Serialization(e.to_string()))?;
        medium.overwrite(&path, &raw)?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }
}

/// Create each directory in `paths` that does not exist yet.
pub fn init_folders<M: StorageMedium>(medium: &M, paths: &[PathBuf]) -> BacklogResult<()> {
    for path in paths {
        if !medium.exists(path) {
            medium.create_dir_all(path)?;
            debug!(path = %path.display(), "created folder");
        }
    }
    Ok(())
}
