//! Hand-position anchors, expected fingers, and the scale mask
//!
//! The anchor pass groups consecutive notes into hand positions: a
//! position holds while its pitch range stays within 8 semitones and
//! closes when the next note would exceed it. The anchor is the
//! bottom of the range for the right hand and the top for the left;
//! the five-finger map then prescribes an expected finger for every
//! offset from the anchor.

use crate::models::{Hand, Note};

/// Per-note anchor pitches for a hand-local stream.
///
/// Every closed position contributes its own anchor. The trailing
/// position is still being established when the stream ends, so its
/// notes stay under the last closed anchor; a stream that never
/// leaves one position uses that position's own range.
pub fn hand_position_anchors(notes: &[Note], hand: Hand) -> Vec<u8> {
    let mut anchors = vec![0u8; notes.len()];
    if notes.is_empty() {
        return anchors;
    }

    let anchor_of = |lo: u8, hi: u8| match hand {
        Hand::Rh => lo,
        Hand::Lh => hi,
    };

    let mut seg_start = 0;
    let mut lo = notes[0].pitch;
    let mut hi = notes[0].pitch;
    let mut last_closed: Option<u8> = None;

    for (i, note) in notes.iter().enumerate().skip(1) {
        let new_lo = lo.min(note.pitch);
        let new_hi = hi.max(note.pitch);
        if new_hi - new_lo > 8 {
            let anchor = anchor_of(lo, hi);
            for slot in &mut anchors[seg_start..i] {
                *slot = anchor;
            }
            last_closed = Some(anchor);
            seg_start = i;
            lo = note.pitch;
            hi = note.pitch;
        } else {
            lo = new_lo;
            hi = new_hi;
        }
    }

    let trailing = last_closed.unwrap_or_else(|| anchor_of(lo, hi));
    for slot in &mut anchors[seg_start..] {
        *slot = trailing;
    }

    anchors
}

/// Finger prescribed by the five-finger position map for a note at
/// the given offset from the anchor
pub fn expected_finger(hand: Hand, anchor: u8, pitch: u8) -> u8 {
    let delta = pitch as i32 - anchor as i32;
    match hand {
        Hand::Rh => {
            if delta <= 0 {
                1
            } else if delta <= 2 {
                2
            } else if delta <= 4 {
                3
            } else if delta <= 6 {
                4
            } else {
                5
            }
        }
        Hand::Lh => {
            if delta >= 0 {
                1
            } else if delta >= -2 {
                2
            } else if delta >= -4 {
                3
            } else if delta >= -6 {
                4
            } else {
                5
            }
        }
    }
}

/// Mark notes inside a maximal monotone stepwise run of at least 4
/// consecutive intervals (|I| in {1, 2}, all the same sign).
pub fn scale_mask(notes: &[Note]) -> Vec<bool> {
    let n = notes.len();
    let mut mask = vec![false; n];
    if n < 2 {
        return mask;
    }

    let intervals: Vec<i32> = notes
        .windows(2)
        .map(|pair| pair[1].pitch as i32 - pair[0].pitch as i32)
        .collect();
    let stepwise = |v: i32| v.abs() == 1 || v.abs() == 2;

    let mut i = 0;
    while i < intervals.len() {
        if !stepwise(intervals[i]) {
            i += 1;
            continue;
        }
        let sign = intervals[i].signum();
        let mut j = i;
        while j + 1 < intervals.len()
            && stepwise(intervals[j + 1])
            && intervals[j + 1].signum() == sign
        {
            j += 1;
        }
        // run spans intervals [i, j], notes [i, j + 1]
        if j - i + 1 >= 4 {
            for slot in &mut mask[i..=j + 1] {
                *slot = true;
            }
        }
        i = j + 1;
    }

    mask
}
