//! Pattern recognition over a hand-local note stream
//!
//! Slides an adaptive window across the stream, classifies each
//! window with the priority decision tree, and post-processes the
//! window labels into a sorted list of non-overlapping segments
//! covering every note.
//!
//! The recognizer is total: it reports no errors, and an empty
//! stream yields an empty segment list.

pub mod classify;
pub mod features;
pub mod window;

pub use classify::{classify_window, identify_chord, ChordId, Classification};
pub use features::{extract, WindowFeatures};
pub use window::{adaptive_window_size, BASE_WINDOW};

use crate::models::{Note, PatternDetail, PatternSegment, PatternType};

/// Segments a note stream into labeled musical patterns
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternRecognizer;

impl PatternRecognizer {
    pub fn new() -> Self {
        Self
    }

    /// Classify the stream into non-overlapping labeled segments
    /// whose union covers every note.
    pub fn analyze(&self, notes: &[Note]) -> Vec<PatternSegment> {
        if notes.is_empty() {
            return Vec::new();
        }
        if notes.len() == 1 {
            // too short to window; a lone note carries no pattern
            return vec![PatternSegment::new(
                0,
                0,
                PatternType::Unknown,
                0.5,
                PatternDetail::None,
            )];
        }

        let mut raw = Vec::new();
        let mut cursor = 0;
        while cursor < notes.len() {
            if notes.len() - cursor < 2 {
                cursor += 1;
                continue;
            }

            let size = adaptive_window_size(notes, cursor);
            let end = (cursor + size).min(notes.len());
            let window = &notes[cursor..end];

            let feats = extract(window);
            let class = classify_window(window, &feats);
            log::debug!(
                "window [{}, {}) classified as {} ({:.2})",
                cursor,
                end,
                class.pattern_type,
                class.confidence
            );
            raw.push(PatternSegment::new(
                cursor,
                end - 1,
                class.pattern_type,
                class.confidence,
                class.detail,
            ));

            cursor += (size / 2).max(1);
        }

        merge_segments(raw)
    }
}

/// Merge adjacent window labels into the final segment list.
///
/// The running segment absorbs the next one when both carry the same
/// pattern type, or when the running segment is still shorter than 3
/// notes. Otherwise the next segment is clipped past the running
/// segment's end so the output never overlaps.
fn merge_segments(raw: Vec<PatternSegment>) -> Vec<PatternSegment> {
    let mut iter = raw.into_iter();
    let mut current = match iter.next() {
        Some(first) => first,
        None => return Vec::new(),
    };

    let mut merged = Vec::new();
    for mut next in iter {
        if next.pattern_type == current.pattern_type || current.len() < 3 {
            current.end_index = current.end_index.max(next.end_index);
            current.confidence = current.confidence.max(next.confidence);
        } else {
            if next.start_index <= current.end_index {
                if next.end_index <= current.end_index {
                    // window fully inside the running segment
                    continue;
                }
                next.start_index = current.end_index + 1;
            }
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);
    merged
}
