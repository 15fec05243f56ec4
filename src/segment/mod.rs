//! Run-length segmentation of per-frame expression codes.
//!
//! A section is a maximal run of consecutive frames sharing one code for a
//! single category. The sections of a category are ordered, contiguous and
//! together cover every frame of the animation exactly once.

mod editor;

pub use editor::{EditorError, ExpressionEditor, ExpressionTracks, RangeError, RangeWrite};

use std::fmt;

use crate::animation::{AnimationBuffer, Category};

/// Defensive error for segmenting an animation with no frames.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    #[error("Cannot segment an animation with no frames")]
    EmptyAnimation,
}

/// A contiguous run of frames sharing one expression code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// First frame of the run.
    pub start: usize,
    /// Last frame of the run (inclusive).
    pub end: usize,
    /// Code shared by every frame in the run.
    pub expression: u8,
}

impl Section {
    /// Number of frames in the run.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.end - self.start + 1
    }

    #[inline]
    pub fn contains(&self, frame: usize) -> bool {
        (self.start..=self.end).contains(&frame)
    }

    /// Listing form, e.g. `CLOSED: 2 - 4`.
    pub fn describe(&self, category: Category) -> SectionLabel<'_> {
        SectionLabel {
            section: self,
            category,
        }
    }
}

/// Display adapter returned by [`Section::describe`].
pub struct SectionLabel<'a> {
    section: &'a Section,
    category: Category,
}

impl fmt::Display for SectionLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Section {
            start,
            end,
            expression,
        } = *self.section;
        write!(
            f,
            "{}: {} - {}",
            self.category.describe_code(expression),
            start,
            end
        )
    }
}

/// Derive the sections of one category from a buffer.
///
/// `decode` maps a frame's control byte to the code being segmented; pass
/// `|b| category.decode(b)` for the stock nibble layout.
pub fn rebuild_sections<F>(buffer: &AnimationBuffer, decode: F) -> Result<Vec<Section>, SegmentError>
where
    F: Fn(u8) -> u8,
{
    segment_codes(buffer.control_bytes().map(decode))
}

/// Segment an arbitrary sequence of per-frame codes.
pub fn segment_codes<I>(codes: I) -> Result<Vec<Section>, SegmentError>
where
    I: IntoIterator<Item = u8>,
{
    let mut codes = codes.into_iter();
    let first = codes.next().ok_or(SegmentError::EmptyAnimation)?;

    let mut sections = Vec::new();
    let mut open_start = 0;
    let mut open_code = first;
    let mut frame = 0;

    for code in codes {
        frame += 1;
        if code != open_code {
            sections.push(Section {
                start: open_start,
                end: frame - 1,
                expression: open_code,
            });
            open_start = frame;
            open_code = code;
        }
    }

    sections.push(Section {
        start: open_start,
        end: frame,
        expression: open_code,
    });

    Ok(sections)
}

/// Index of the section containing `frame`, if any.
pub fn section_at(sections: &[Section], frame: usize) -> Option<usize> {
    let idx = sections.partition_point(|s| s.end < frame);
    (idx < sections.len() && sections[idx].contains(frame)).then_some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::buffer::tests::buffer_with_controls;
    use crate::animation::{EyeExpression, MouthExpression};

    fn eye(code: EyeExpression) -> u8 {
        code.code()
    }

    /// Sections are ordered, contiguous, cover `0..frame_count` and never
    /// repeat a code across a boundary.
    fn assert_well_formed(sections: &[Section], frame_count: usize) {
        assert!(!sections.is_empty());
        assert_eq!(sections[0].start, 0);
        assert_eq!(sections[sections.len() - 1].end, frame_count - 1);
        for s in sections {
            assert!(s.start <= s.end);
        }
        for pair in sections.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start);
            assert_ne!(pair[0].expression, pair[1].expression);
        }
        assert_eq!(sections.iter().map(Section::frame_count).sum::<usize>(), frame_count);
    }

    #[test]
    fn test_single_frame() {
        let buffer = buffer_with_controls(&[0x13]);
        let sections = rebuild_sections(&buffer, |b| Category::Eye.decode(b)).unwrap();
        assert_eq!(
            sections,
            vec![Section {
                start: 0,
                end: 0,
                expression: 3
            }]
        );
    }

    #[test]
    fn test_uniform_animation() {
        let buffer = buffer_with_controls(&[0x21; 40]);
        for category in Category::ALL {
            let sections = rebuild_sections(&buffer, |b| category.decode(b)).unwrap();
            assert_eq!(sections.len(), 1);
            assert_eq!(sections[0].start, 0);
            assert_eq!(sections[0].end, 39);
        }
    }

    #[test]
    fn test_runs() {
        let open = eye(EyeExpression::Open);
        let closed = eye(EyeExpression::Closed);
        let codes = [open, open, closed, closed, closed, open, eye(EyeExpression::Auto)];
        let sections = segment_codes(codes).unwrap();
        assert_eq!(
            sections,
            vec![
                Section {
                    start: 0,
                    end: 1,
                    expression: open,
                },
                Section {
                    start: 2,
                    end: 4,
                    expression: closed,
                },
                Section {
                    start: 5,
                    end: 5,
                    expression: open,
                },
                Section {
                    start: 6,
                    end: 6,
                    expression: 0,
                },
            ]
        );
        assert_well_formed(&sections, codes.len());
    }

    #[test]
    fn test_categories_segment_independently() {
        // Mouth changes at frame 2, eye changes at frame 3.
        let buffer = buffer_with_controls(&[0x11, 0x11, 0x41, 0x43, 0x43]);
        let eyes = rebuild_sections(&buffer, |b| Category::Eye.decode(b)).unwrap();
        let mouths = rebuild_sections(&buffer, |b| Category::Mouth.decode(b)).unwrap();
        assert_eq!(eyes.len(), 2);
        assert_eq!(eyes[1].start, 3);
        assert_eq!(mouths.len(), 2);
        assert_eq!(mouths[1].start, 2);
        assert_eq!(mouths[1].expression, MouthExpression::Smile.code());
    }

    #[test]
    fn test_empty_is_error() {
        assert_eq!(
            segment_codes(std::iter::empty::<u8>()),
            Err(SegmentError::EmptyAnimation)
        );
    }

    #[test]
    fn test_section_at() {
        let sections = segment_codes([1, 1, 2, 3, 3, 3]).unwrap();
        assert_eq!(section_at(&sections, 0), Some(0));
        assert_eq!(section_at(&sections, 2), Some(1));
        assert_eq!(section_at(&sections, 5), Some(2));
        assert_eq!(section_at(&sections, 6), None);
    }

    #[test]
    fn test_describe() {
        let known = Section {
            start: 2,
            end: 4,
            expression: 3,
        };
        assert_eq!(known.describe(Category::Eye).to_string(), "CLOSED: 2 - 4");
        assert_eq!(known.describe(Category::Mouth).to_string(), "WIDE: 2 - 4");
        let unknown = Section {
            start: 0,
            end: 9,
            expression: 12,
        };
        assert_eq!(unknown.describe(Category::Eye).to_string(), "#12: 0 - 9");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_sections_cover_frames(codes in prop::collection::vec(0u8..4, 1..300)) {
                let sections = segment_codes(codes.iter().copied()).unwrap();
                assert_well_formed(&sections, codes.len());
                for s in &sections {
                    prop_assert!(codes[s.start..=s.end].iter().all(|&c| c == s.expression));
                }
            }

            #[test]
            fn prop_rebuild_matches_decoded(controls in prop::collection::vec(any::<u8>(), 1..64)) {
                let buffer = buffer_with_controls(&controls);
                for category in Category::ALL {
                    let sections = rebuild_sections(&buffer, |b| category.decode(b)).unwrap();
                    assert_well_formed(&sections, controls.len());
                    for (frame, &control) in controls.iter().enumerate() {
                        let idx = section_at(&sections, frame).unwrap();
                        prop_assert_eq!(sections[idx].expression, category.decode(control));
                    }
                }
            }
        }
    }
}
