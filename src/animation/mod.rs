//! Rig animation buffers and playback.
//!
//! # File Format
//!
//! An animation is a bare sequence of fixed-size frames with no header:
//!
//! ```text
//! Frame (86 bytes):
//!   Rig data: 85 bytes (opaque)
//!   Control byte: u8
//!     bits 0-3: eye expression code
//!     bits 4-7: mouth expression code
//! ```
//!
//! A file whose length is zero or not a multiple of 86 is rejected.

pub(crate) mod buffer;
mod file;
mod format;
mod player;

pub use buffer::{AnimationBuffer, AnimationError};
pub use file::{read_animation, write_animation};
pub use format::{
    CONTROL_BYTE_OFFSET, Category, EyeExpression, FRAME_SIZE, MAX_CODE, MouthExpression,
    UnknownCategory, decode_eye, decode_mouth, encode_eye, encode_mouth,
};
pub use player::{HostClock, PlaybackDriver, PlaybackState, RigSink};
