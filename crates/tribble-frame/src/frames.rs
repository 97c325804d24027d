use std::iter::FusedIterator;

use crate::codec::decode_frame;
use crate::error::FrameResult;

/// Lazy iterator over the frames in a byte buffer.
///
/// Yields each payload in write order. The first malformed frame is yielded
/// as an `Err` and ends iteration; nothing past a corrupt frame is trusted.
/// Clone the iterator (or build a new one) to restart.
#[derive(Clone, Debug)]
pub struct Frames<'a> {
    data: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Frames<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            failed: false,
        }
    }

    /// Byte offset of the next frame to be decoded.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = FrameResult<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.data.len() {
            return None;
        }

        match decode_frame(&self.data[self.offset..]) {
            Ok(frame) => {
                self.offset += frame.end;
                Some(Ok(frame.payload))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Frames<'_> {}
