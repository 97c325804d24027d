use thiserror::Error;

/// Errors produced while encoding or decoding frames.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameError {
    /// Payload (on encode) or whole input (on decode) exceeds the format limit.
    #[error("maximum allowed bytes {limit} exceeded: found {actual}")]
    PayloadTooLarge { limit: u64, actual: u64 },

    /// Fewer bytes than the length prefix needs. Empty or non-framed input.
    #[error("no prefixed data found: need {} bytes, got {actual}", crate::codec::PREFIX_WIDTH)]
    TooShortForPrefix { actual: usize },

    /// The prefix declares more payload bytes than follow it.
    #[error("truncated payload: prefix declares {declared} bytes, only {available} available")]
    TruncatedPayload { declared: u32, available: usize },
}

impl FrameError {
    /// Returns `true` for errors that indicate malformed input rather than a
    /// size limit.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::TooShortForPrefix { .. } | Self::TruncatedPayload { .. }
        )
    }
}

/// Convenience alias used throughout the frame crate.
pub type FrameResult<T> = Result<T, FrameError>;
