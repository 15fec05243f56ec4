//! Owned animation bytes with frame-level access.

use super::format::{CONTROL_BYTE_OFFSET, Category, FRAME_SIZE};

/// Errors raised while loading or indexing an animation buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    #[error(
        "Not a valid animation: {len} bytes is not a positive multiple of {frame_size}",
        frame_size = FRAME_SIZE
    )]
    InvalidFormat { len: usize },
    #[error("Frame index {frame} out of range ({frame_count} frames)")]
    FrameOutOfRange { frame: usize, frame_count: usize },
}

/// Raw animation data, stored verbatim.
///
/// The length is always a positive multiple of [`FRAME_SIZE`]. Frame `f`
/// occupies `bytes[f * FRAME_SIZE..(f + 1) * FRAME_SIZE]` and its last byte
/// is the control byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationBuffer {
    bytes: Vec<u8>,
    frame_count: usize,
}

impl AnimationBuffer {
    /// Validate and take ownership of raw animation bytes.
    pub fn load(bytes: Vec<u8>) -> Result<Self, AnimationError> {
        if bytes.is_empty() || bytes.len() % FRAME_SIZE != 0 {
            return Err(AnimationError::InvalidFormat { len: bytes.len() });
        }
        let frame_count = bytes.len() / FRAME_SIZE;
        Ok(Self { bytes, frame_count })
    }

    /// Number of frames.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Index of the last frame.
    #[inline]
    pub fn last_frame(&self) -> usize {
        self.frame_count - 1
    }

    /// Raw bytes, unchanged apart from control-byte edits.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The full `FRAME_SIZE`-byte window of one frame.
    pub fn frame_slice(&self, frame: usize) -> Result<&[u8], AnimationError> {
        self.check_frame(frame)?;
        let start = frame * FRAME_SIZE;
        Ok(&self.bytes[start..start + FRAME_SIZE])
    }

    /// The control byte of one frame.
    pub fn control_byte(&self, frame: usize) -> Result<u8, AnimationError> {
        self.check_frame(frame)?;
        Ok(self.bytes[Self::control_offset(frame)])
    }

    /// Overwrite the control byte of one frame.
    pub fn write_control_byte(&mut self, frame: usize, byte: u8) -> Result<(), AnimationError> {
        self.check_frame(frame)?;
        self.bytes[Self::control_offset(frame)] = byte;
        Ok(())
    }

    /// Iterate over every frame's control byte, in frame order.
    pub fn control_bytes(&self) -> impl ExactSizeIterator<Item = u8> + '_ {
        self.bytes
            .chunks_exact(FRAME_SIZE)
            .map(|frame| frame[CONTROL_BYTE_OFFSET])
    }

    /// Decoded code of `category` for one frame.
    pub fn expression(&self, frame: usize, category: Category) -> Result<u8, AnimationError> {
        self.control_byte(frame).map(|byte| category.decode(byte))
    }

    #[inline]
    fn control_offset(frame: usize) -> usize {
        frame * FRAME_SIZE + CONTROL_BYTE_OFFSET
    }

    fn check_frame(&self, frame: usize) -> Result<(), AnimationError> {
        if frame >= self.frame_count {
            return Err(AnimationError::FrameOutOfRange {
                frame,
                frame_count: self.frame_count,
            });
        }
        Ok(())
    }
}

impl AsRef<[u8]> for AnimationBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
