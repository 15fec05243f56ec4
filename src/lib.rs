//! Face Anim Edit - Expression track editing for fixed-stride rig animations.
//!
//! Each 86-byte animation frame ends in a control byte that packs an eye
//! expression (low nibble) and a mouth expression (high nibble). This crate
//! validates animation buffers, decodes those codes into runs of identical
//! expressions ("sections"), and rewrites frame ranges to a new expression.
//!
//! # Architecture
//!
//! - `animation`: Buffer validation, the nibble codec, file I/O and playback
//! - `segment`: Section derivation and the range-write editor
//! - `schema`: Configuration and batch edit scripts
//!
//! # Example
//!
//! ```rust,no_run
//! use face_anim_edit::{
//!     animation::{Category, EyeExpression, read_animation, write_animation},
//!     segment::{ExpressionEditor, RangeWrite},
//! };
//!
//! let mut editor = ExpressionEditor::new();
//! editor.load(read_animation("walk.anim")?)?;
//!
//! // Open the eyes on frames 2 through 4
//! let open = EyeExpression::Open.code();
//! editor.apply_range_write(&RangeWrite::new(Category::Eye, 2, 4, open))?;
//!
//! for section in editor.sections(Category::Eye)? {
//!     println!("{}", section.describe(Category::Eye));
//! }
//!
//! write_animation("walk.anim", editor.save()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod animation;
pub mod schema;
pub mod segment;

// Re-export commonly used types
pub use animation::{AnimationBuffer, Category, FRAME_SIZE, PlaybackDriver};
pub use schema::{EditScript, EditorConfig};
pub use segment::{EditorError, ExpressionEditor, RangeWrite, Section};
