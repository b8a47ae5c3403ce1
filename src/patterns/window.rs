//! Adaptive windowing for the pattern recognizer
//!
//! Window length adapts to local rhythmic density: fast passages get
//! long windows so figures like runs and trills fit inside one
//! window, slow passages get short ones.

use crate::models::Note;

/// Base window length in notes
pub const BASE_WINDOW: usize = 8;

/// How many upcoming notes participate in the density estimate
const LOOKAHEAD: usize = 16;

/// Window length at `cursor`, from the mean duration of up to the
/// next 16 notes. Boundaries are strict: a mean of exactly 0.5 or
/// exactly 2.0 keeps the base window.
pub fn adaptive_window_size(notes: &[Note], cursor: usize) -> usize {
    let end = (cursor + LOOKAHEAD).min(notes.len());
    let lookahead = &notes[cursor..end];
    if lookahead.is_empty() {
        return BASE_WINDOW;
    }

    let mean: f64 =
        lookahead.iter().map(|n| n.duration).sum::<f64>() / lookahead.len() as f64;

    if mean < 0.25 {
        16
    } else if mean < 0.5 {
        12
    } else if mean > 2.0 {
        4
    } else {
        BASE_WINDOW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(duration: f64, count: usize) -> Vec<Note> {
        (0..count).map(|i| Note::new(60 + i as u8, duration)).collect()
    }

    #[test]
    fn test_fast_notes_widen_window() {
        assert_eq!(adaptive_window_size(&stream(0.125, 20), 0), 16);
        assert_eq!(adaptive_window_size(&stream(0.3, 20), 0), 12);
    }

    #[test]
    fn test_slow_notes_narrow_window() {
        assert_eq!(adaptive_window_size(&stream(4.0, 20), 0), 4);
    }

    #[test]
    fn test_boundaries_are_strict() {
        // exactly 0.5 stays on the base window (the < 0.5 branch is strict)
        assert_eq!(adaptive_window_size(&stream(0.5, 20), 0), BASE_WINDOW);
        // exactly 2.0 likewise
        assert_eq!(adaptive_window_size(&stream(2.0, 20), 0), BASE_WINDOW);
    }

    #[test]
    fn test_lookahead_is_bounded() {
        // 16 slow notes followed by fast ones: cursor at 0 sees only slow
        let mut notes = stream(4.0, 16);
        notes.extend(stream(0.1, 16));
        assert_eq!(adaptive_window_size(&notes, 0), 4);
        assert_eq!(adaptive_window_size(&notes, 16), 16);
    }
}
