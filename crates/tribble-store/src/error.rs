use std::io;
use std::path::{Path, PathBuf};

use tribble_frame::FrameError;

/// Errors from framed file store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Encoding failed, or the file does not start with a well-formed frame.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The storage medium failed (permission, missing path, device error).
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A write mode name that is neither `append` nor `overwrite`.
    #[error("unknown write mode: {0}")]
    UnknownWriteMode(String),
}

impl StoreError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The file exists but its bytes are not a well-formed frame.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Frame(e) if e.is_corruption())
    }

    /// A payload or frame exceeded the format's size limit.
    pub fn is_capacity(&self) -> bool {
        matches!(self, Self::Frame(FrameError::PayloadTooLarge { .. }))
    }

    /// The path does not exist on the medium.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let capacity = StoreError::from(FrameError::PayloadTooLarge {
            limit: u64::from(u32::MAX),
            actual: u64::from(u32::MAX) + 1,
        });
        assert!(capacity.is_capacity());
        assert!(!capacity.is_corruption());

        let corrupt = StoreError::from(FrameError::TruncatedPayload {
            declared: 5,
            available: 0,
        });
        assert!(corrupt.is_corruption());
        assert!(!corrupt.is_capacity());

        let missing = StoreError::io(
            Path::new("missing"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(missing.is_not_found());
        assert!(!missing.is_capacity());
        assert!(!missing.is_corruption());

        let mode = StoreError::UnknownWriteMode("x".into());
        assert!(!mode.is_capacity() && !mode.is_corruption() && !mode.is_not_found());
    }
}
