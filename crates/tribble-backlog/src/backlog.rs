use std::path::PathBuf;

use tracing::{debug, info};
use tribble_store::{DiskMedium, FramedFileStore, StorageMedium, WriteMode};

use crate::config::Config;
use crate::entry::BacklogEntry;
use crate::error::BacklogResult;

/// Append-only log of backlog entries on top of a [`FramedFileStore`].
///
/// Each entry is one frame. Entries are never edited in place; a status
/// change is recorded by appending a new version of the entry.
pub struct Backlog<M: StorageMedium = DiskMedium> {
    config: Config,
    store: FramedFileStore<M>,
}

impl<M: StorageMedium> Backlog<M> {
    pub fn open(config: Config, store: FramedFileStore<M>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &FramedFileStore<M> {
        &self.store
    }

    /// Resolved path of the backlog file.
    pub fn path(&self) -> PathBuf {
        self.store.resolve(&self.config.backlog_path)
    }

    /// Log a new entry at the end of the backlog.
    pub fn append(&self, entry: &BacklogEntry) -> BacklogResult<()> {
        self.write(entry, WriteMode::Append)
    }

    /// Reset the backlog so it holds only `entry`.
    pub fn replace_all(&self, entry: &BacklogEntry) -> BacklogResult<()> {
        self.write(entry, WriteMode::Overwrite)
    }

    /// Write `entry` with an explicit mode.
    pub fn write(&self, entry: &BacklogEntry, mode: WriteMode) -> BacklogResult<()> {
        let payload = self.config.entry_format.encode(entry)?;
        self.store.write(&self.config.backlog_path, mode, &payload)?;
        debug!(id = %entry.id, %mode, "entry written");
        Ok(())
    }

    /// Replay every entry in write order. A missing backlog is empty.
    pub fn entries(&self) -> BacklogResult<Vec<BacklogEntry>> {
        let payloads = match self.store.read_all(&self.config.backlog_path) {
            Ok(payloads) => payloads,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let entries = payloads
            .iter()
            .map(|payload| self.config.entry_format.decode(payload))
            .collect::<BacklogResult<Vec<_>>>()?;

        info!(count = entries.len(), "backlog replayed");
        Ok(entries)
    }

    /// The oldest entry, read from the leading frame only.
    pub fn first(&self) -> BacklogResult<Option<BacklogEntry>> {
        let payload = match self.store.read(&self.config.backlog_path) {
            Ok(payload) => payload,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        self.config.entry_format.decode(&payload).map(Some)
    }

    /// Latest version of every entry, keyed by id, in first-seen order.
    pub fn latest(&self) -> BacklogResult<Vec<BacklogEntry>> {
        let mut latest: Vec<BacklogEntry> = Vec::new();
        for entry in self.entries()? {
            match latest.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => *existing = entry,
                None => latest.push(entry),
            }
        }
        Ok(latest)
    }
}
