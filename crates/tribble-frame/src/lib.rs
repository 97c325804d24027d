//! Length-prefixed record framing for tribble.
//!
//! A frame is a little-endian `u32` byte count followed by exactly that many
//! payload bytes. Frames carry no header, version tag, or checksum; a file is
//! simply zero or more frames concatenated in write order.
//!
//! ```text
//! Frame := [4 bytes: payload length (little-endian u32)] [N bytes: payload]
//! File  := Frame*
//! ```
//!
//! This crate is pure: it never touches the filesystem. See `tribble-store`
//! for the file-backed append/overwrite primitives built on it.
//!
//! # Key Items
//!
//! - [`encode`] / [`decode`] -- payload to frame bytes and back
//! - [`decode_frame`] -- decode and also report where the frame ends
//! - [`Frames`] -- lazy iterator over every frame in a byte buffer

pub mod codec;
pub mod error;
pub mod frames;

pub use codec::{
    check_frame_len, check_payload_len, decode, decode_frame, encode, encode_into, DecodedFrame,
    MAX_FRAME_LEN, MAX_PAYLOAD_LEN, PREFIX_WIDTH,
};
pub use error::{FrameError, FrameResult};
pub use frames::Frames;
