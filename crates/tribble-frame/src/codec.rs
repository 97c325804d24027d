use crate::error::{FrameError, FrameResult};

/// Width in bytes of the little-endian length prefix.
pub const PREFIX_WIDTH: usize = 4;

/// Largest payload a single frame can carry (`u32::MAX`).
pub const MAX_PAYLOAD_LEN: u64 = u32::MAX as u64;

/// Largest input `decode` accepts: one maximal payload plus its prefix.
pub const MAX_FRAME_LEN: u64 = MAX_PAYLOAD_LEN + PREFIX_WIDTH as u64;

/// A frame located at the start of a byte buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedFrame<'a> {
    /// Payload bytes, borrowed from the input.
    pub payload: &'a [u8],
    /// Offset one past the last payload byte. The next frame, if any, starts here.
    pub end: usize,
}

/// Validate that a payload of `len` bytes fits in a frame.
///
/// Returns the value that goes into the length prefix.
pub fn check_payload_len(len: usize) -> FrameResult<u32> {
    u32::try_from(len).map_err(|_| FrameError::PayloadTooLarge {
        limit: MAX_PAYLOAD_LEN,
        actual: len as u64,
    })
}

/// Validate that `len` input bytes do not exceed [`MAX_FRAME_LEN`].
pub fn check_frame_len(len: usize) -> FrameResult<()> {
    if len as u64 > MAX_FRAME_LEN {
        return Err(FrameError::PayloadTooLarge {
            limit: MAX_FRAME_LEN,
            actual: len as u64,
        });
    }
    Ok(())
}

/// Encode `payload` as `[len: u32 LE][payload]`.
pub fn encode(payload: &[u8]) -> FrameResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(PREFIX_WIDTH + payload.len());
    encode_into(payload, &mut buf)?;
    Ok(buf)
}

/// Append the frame for `payload` to `buf`. Returns the number of bytes written.
///
/// On error `buf` is left untouched.
pub fn encode_into(payload: &[u8], buf: &mut Vec<u8>) -> FrameResult<usize> {
    let len = check_payload_len(payload.len())?;
    buf.reserve(PREFIX_WIDTH + payload.len());
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(payload);
    Ok(PREFIX_WIDTH + payload.len())
}

/// Decode the frame at the start of `data` and return its payload.
///
/// Bytes after the first frame are ignored.
pub fn decode(data: &[u8]) -> FrameResult<&[u8]> {
    decode_frame(data).map(|frame| frame.payload)
}

/// Decode the frame at the start of `data`, reporting where it ends.
pub fn decode_frame(data: &[u8]) -> FrameResult<DecodedFrame<'_>> {
    if data.len() < PREFIX_WIDTH {
        return Err(FrameError::TooShortForPrefix { actual: data.len() });
    }
    check_frame_len(data.len())?;

    let mut prefix = [0u8; PREFIX_WIDTH];
    prefix.copy_from_slice(&data[..PREFIX_WIDTH]);
    let declared = u32::from_le_bytes(prefix);

    let end = PREFIX_WIDTH as u64 + u64::from(declared);
    if (data.len() as u64) < end {
        return Err(FrameError::TruncatedPayload {
            declared,
            available: data.len() - PREFIX_WIDTH,
        });
    }

    // end <= data.len(), so the cast cannot truncate.
    let end = end as usize;
    Ok(DecodedFrame {
        payload: &data[PREFIX_WIDTH..end],
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encode_hello_is_wire_exact() {
        let frame = encode(b"hello").unwrap();
        assert_eq!(
            frame,
            [0x05, 0x00, 0x00, 0x00, 0x68, 0x65, 0x6c, 0x6c, 0x6f]
        );
    }

    #[test]
    fn decode_hello() {
        let data = [0x05, 0x00, 0x00, 0x00, 0x68, 0x65, 0x6c, 0x6c, 0x6f];
        assert_eq!(decode(&data).unwrap(), b"hello");
    }

    #[test]
    fn empty_payload_is_prefix_only() {
        let frame = encode(b"").unwrap();
        assert_eq!(frame, [0, 0, 0, 0]);
        let decoded = decode_frame(&frame).unwrap();
        assert!(decoded.payload.is_empty());
        assert_eq!(decoded.end, PREFIX_WIDTH);
    }

    #[test]
    fn prefix_is_little_endian() {
        let payload = vec![0xAB; 0x0102];
        let frame = encode(&payload).unwrap();
        assert_eq!(&frame[..PREFIX_WIDTH], &[0x02, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn payload_len_boundary() {
        assert_eq!(check_payload_len(0).unwrap(), 0);
        assert_eq!(check_payload_len(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn payload_len_one_past_max_is_rejected() {
        let err = check_payload_len(u32::MAX as usize + 1).unwrap_err();
        assert_eq!(
            err,
            FrameError::PayloadTooLarge {
                limit: MAX_PAYLOAD_LEN,
                actual: MAX_PAYLOAD_LEN + 1,
            }
        );
        assert_eq!(
            err.to_string(),
            "maximum allowed bytes 4294967295 exceeded: found 4294967296"
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn frame_len_boundary() {
        assert!(check_frame_len(MAX_FRAME_LEN as usize).is_ok());
        assert!(matches!(
            check_frame_len(MAX_FRAME_LEN as usize + 1),
            Err(FrameError::PayloadTooLarge { limit: MAX_FRAME_LEN, .. })
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    #[ignore = "allocates 4 GiB"]
    fn encode_max_payload() {
        let payload = vec![0xAA; u32::MAX as usize];
        let frame = encode(&payload).unwrap();
        assert_eq!(frame.len(), PREFIX_WIDTH + u32::MAX as usize);
        assert_eq!(&frame[..PREFIX_WIDTH], &[0xFF, 0xFF, 0xFF, 0xFF]);

        let too_big = vec![0xBB; u32::MAX as usize + 1];
        assert!(matches!(
            encode(&too_big),
            Err(FrameError::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn decode_short_input() {
        for len in 0..PREFIX_WIDTH {
            let data = vec![0x01; len];
            assert_eq!(
                decode(&data).unwrap_err(),
                FrameError::TooShortForPrefix { actual: len }
            );
        }
    }

    #[test]
    fn decode_missing_payload() {
        let err = decode(&[0x05, 0x00, 0x00, 0x00]).unwrap_err();
        assert_eq!(
            err,
            FrameError::TruncatedPayload {
                declared: 5,
                available: 0
            }
        );
        assert!(err.is_corruption());
    }

    #[test]
    fn decode_corrupted_prefix() {
        let mut data = vec![0xFF, 0xFF, 0xFF, 0xFF];
        data.extend_from_slice(b"corrupted");
        assert!(matches!(
            decode(&data),
            Err(FrameError::TruncatedPayload {
                declared: u32::MAX,
                available: 9
            })
        ));
    }

    #[test]
    fn decode_ignores_trailing_frames() {
        let mut data = encode(b"first").unwrap();
        data.extend(encode(b"second").unwrap());

        let first = decode_frame(&data).unwrap();
        assert_eq!(first.payload, b"first");
        assert_eq!(first.end, 9);

        let second = decode_frame(&data[first.end..]).unwrap();
        assert_eq!(second.payload, b"second");
        assert_eq!(first.end + second.end, data.len());
    }

    #[test]
    fn encode_into_appends() {
        let mut buf = b"xy".to_vec();
        let written = encode_into(b"abc", &mut buf).unwrap();
        assert_eq!(written, 7);
        assert_eq!(buf, [b'x', b'y', 3, 0, 0, 0, b'a', b'b', b'c']);
    }

    proptest! {
        #[test]
        fn roundtrip(payload in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let frame = encode(&payload).unwrap();
            prop_assert_eq!(frame.len(), PREFIX_WIDTH + payload.len());
            prop_assert_eq!(decode(&frame).unwrap(), payload.as_slice());
        }

        #[test]
        fn dropping_last_byte_is_detected(
            payload in proptest::collection::vec(any::<u8>(), 1..2048)
        ) {
            let mut frame = encode(&payload).unwrap();
            frame.pop();
            let is_truncated = matches!(
                decode(&frame),
                Err(FrameError::TruncatedPayload { .. })
            );
            prop_assert!(is_truncated);
        }

        #[test]
        fn decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            if let Ok(frame) = decode_frame(&data) {
                prop_assert!(frame.end <= data.len());
                prop_assert_eq!(frame.payload.len(), frame.end - PREFIX_WIDTH);
            }
        }
    }
}
