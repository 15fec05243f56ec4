//! Expression editor: owns a loaded animation and keeps its section lists
//! in step with the bytes.

use std::io;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use log::{debug, info, warn};
use super::{SegmentError, Section, rebuild_sections};
use crate::animation::{AnimationBuffer, AnimationError, Category, MAX_CODE};
use crate::schema::{ConfigError, ScriptError};

/// Rejected range-write request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Invalid frame range {start}..={end} (valid frames are 0..={last_frame})")]
    InvalidRange {
        start: i64,
        end: i64,
        last_frame: usize,
    },
    #[error("Expression code {code} does not fit in a nibble (valid codes are 0..={max})", max = MAX_CODE)]
    InvalidCode { code: u8 },
}

/// Errors surfaced by the editor.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Format(#[from] AnimationError),
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Segment(#[from] SegmentError),
    #[error("No animation loaded")]
    NotLoaded,
    #[error("{}: {}", .path.display(), .source)]
    Io { path: PathBuf, source: io::Error },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EditorError {
    /// Attach a path to an I/O failure from the file layer.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EditorError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Request to set one category's code over an inclusive frame range.
///
/// Bounds are signed so that out-of-range input from a UI field is
/// rejected rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeWrite {
    pub category: Category,
    pub start: i64,
    pub end: i64,
    pub expression: u8,
}

impl RangeWrite {
    pub fn new(category: Category, start: i64, end: i64, expression: u8) -> Self {
        Self {
            category,
            start,
            end,
            expression,
        }
    }

    /// Check the request against an animation of `frame_count` frames and
    /// return the frames it covers.
    pub fn frames(&self, frame_count: usize) -> Result<RangeInclusive<usize>, RangeError> {
        if self.expression > MAX_CODE {
            return Err(RangeError::InvalidCode {
                code: self.expression,
            });
        }
        let last = frame_count as i64 - 1;
        if self.start < 0 || self.start > self.end || self.end > last {
            return Err(RangeError::InvalidRange {
                start: self.start,
                end: self.end,
                last_frame: frame_count.saturating_sub(1),
            });
        }
        Ok(self.start as usize..=self.end as usize)
    }
}

/// A validated animation together with its eye and mouth sections.
#[derive(Debug, Clone)]
pub struct ExpressionTracks {
    buffer: AnimationBuffer,
    eye: Vec<Section>,
    mouth: Vec<Section>,
}

impl ExpressionTracks {
    /// Segment both categories of `buffer`.
    pub fn new(buffer: AnimationBuffer) -> Result<Self, SegmentError> {
        let mut tracks = Self {
            buffer,
            eye: Vec::new(),
            mouth: Vec::new(),
        };
        tracks.rebuild()?;
        Ok(tracks)
    }

    pub fn buffer(&self) -> &AnimationBuffer {
        &self.buffer
    }

    pub fn frame_count(&self) -> usize {
        self.buffer.frame_count()
    }

    pub fn sections(&self, category: Category) -> &[Section] {
        match category {
            Category::Eye => &self.eye,
            Category::Mouth => &self.mouth,
        }
    }

    /// Set `write.category` to `write.expression` on every frame of the
    /// range, then re-segment both categories.
    ///
    /// Nothing is written unless the whole range and the code are valid.
    pub fn apply(&mut self, write: &RangeWrite) -> Result<(), EditorError> {
        let frames = write
            .frames(self.buffer.frame_count())
            .inspect_err(|e| warn!("Couldn't set {} expression: {}", write.category, e))?;

        for frame in frames.clone() {
            let byte = self.buffer.control_byte(frame)?;
            let byte = write.category.encode(byte, write.expression);
            self.buffer.write_control_byte(frame, byte)?;
        }
        self.rebuild()?;

        info!(
            "Set {} expression {} on frames {}..={}",
            write.category,
            write.category.describe_code(write.expression),
            frames.start(),
            frames.end()
        );
        Ok(())
    }

    fn rebuild(&mut self) -> Result<(), SegmentError> {
        self.eye = rebuild_sections(&self.buffer, |b| Category::Eye.decode(b))?;
        self.mouth = rebuild_sections(&self.buffer, |b| Category::Mouth.decode(b))?;
        debug!(
            "Rebuilt sections: {} eye, {} mouth over {} frames",
            self.eye.len(),
            self.mouth.len(),
            self.buffer.frame_count()
        );
        Ok(())
    }
}

#[derive(Debug, Default)]
enum EditorState {
    #[default]
    Unloaded,
    Loaded(ExpressionTracks),
}

/// Entry point for the UI layer.
///
/// Holds at most one animation. Every successful load or range write leaves
/// freshly rebuilt section lists for both categories; a failed load leaves
/// the editor unloaded.
#[derive(Debug, Default)]
pub struct ExpressionEditor {
    state: EditorState,
}

impl ExpressionEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current animation with `bytes`.
    ///
    /// The previous animation is dropped before validation starts.
    pub fn load(&mut self, bytes: Vec<u8>) -> Result<&ExpressionTracks, EditorError> {
        self.state = EditorState::Unloaded;

        let buffer = AnimationBuffer::load(bytes)
            .inspect_err(|e| warn!("Rejected animation: {}", e))?;
        let tracks = ExpressionTracks::new(buffer)?;
        info!(
            "Loaded animation: {} frames, {} eye sections, {} mouth sections",
            tracks.frame_count(),
            tracks.eye.len(),
            tracks.mouth.len()
        );

        self.state = EditorState::Loaded(tracks);
        self.tracks()
    }

    pub fn unload(&mut self) {
        self.state = EditorState::Unloaded;
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, EditorState::Loaded(_))
    }

    pub fn tracks(&self) -> Result<&ExpressionTracks, EditorError> {
        match &self.state {
            EditorState::Loaded(tracks) => Ok(tracks),
            EditorState::Unloaded => Err(EditorError::NotLoaded),
        }
    }

    /// The loaded buffer, if any.
    pub fn buffer(&self) -> Option<&AnimationBuffer> {
        self.tracks().ok().map(ExpressionTracks::buffer)
    }

    pub fn sections(&self, category: Category) -> Result<&[Section], EditorError> {
        Ok(self.tracks()?.sections(category))
    }

    /// One section by list index, for prefilling an edit from a selection.
    pub fn section(&self, category: Category, index: usize) -> Option<Section> {
        self.tracks()
            .ok()
            .and_then(|t| t.sections(category).get(index).copied())
    }

    pub fn apply_range_write(&mut self, write: &RangeWrite) -> Result<(), EditorError> {
        match &mut self.state {
            EditorState::Loaded(tracks) => tracks.apply(write),
            EditorState::Unloaded => Err(EditorError::NotLoaded),
        }
    }

    /// Bytes to hand back to the file layer.
    pub fn save(&self) -> Result<&[u8], EditorError> {
        Ok(self.tracks()?.buffer.as_bytes())
    }

    pub fn label(&self, category: Category, code: u8) -> &'static str {
        category.label(code)
    }
}
