//! The full analysis pipeline: split, recognize, plan, merge
//!
//! Notes are partitioned into right- and left-hand streams by their
//! hand tag (preserving input order), each stream is segmented and
//! planned independently, and the two solutions are interleaved back
//! into input order. Rests are filtered by the caller before the
//! stream reaches this module.

use crate::fingering::FingeringPlanner;
use crate::models::{
    AnalysisResult, Difficulty, FingeringSolution, Hand, Note, PatternSegment,
};
use crate::patterns::PatternRecognizer;

/// Analyze a two-hand note stream and assign a finger to every note.
///
/// Pure and synchronous: identical inputs give byte-identical
/// results, and every invocation owns its intermediate state.
pub fn analyze(notes: &[Note], difficulty: Difficulty) -> AnalysisResult {
    let (rh_notes, lh_notes) = split_hands(notes);
    log::debug!(
        "analyzing {} notes ({} RH, {} LH) at {}",
        notes.len(),
        rh_notes.len(),
        lh_notes.len(),
        difficulty
    );

    let recognizer = PatternRecognizer::new();
    let planner = FingeringPlanner::new(difficulty);

    let mut rh_segments = recognizer.analyze(&rh_notes);
    for seg in &mut rh_segments {
        seg.hand = Hand::Rh;
    }
    let rh_solution = planner.plan(&rh_notes, &rh_segments);

    let mut lh_segments = recognizer.analyze(&lh_notes);
    for seg in &mut lh_segments {
        seg.hand = Hand::Lh;
    }
    let lh_solution = planner.plan(&lh_notes, &lh_segments);

    AnalysisResult {
        solution: merge_solutions(notes, &rh_solution, &lh_solution),
        segments: merge_segments(rh_segments, lh_segments),
    }
}

/// Segment a two-hand stream without planning any fingering
pub fn recognize(notes: &[Note]) -> Vec<PatternSegment> {
    let (rh_notes, lh_notes) = split_hands(notes);
    let recognizer = PatternRecognizer::new();

    let mut rh_segments = recognizer.analyze(&rh_notes);
    for seg in &mut rh_segments {
        seg.hand = Hand::Rh;
    }
    let mut lh_segments = recognizer.analyze(&lh_notes);
    for seg in &mut lh_segments {
        seg.hand = Hand::Lh;
    }

    merge_segments(rh_segments, lh_segments)
}

/// Partition a stream by hand tag, preserving order within each hand
fn split_hands(notes: &[Note]) -> (Vec<Note>, Vec<Note>) {
    let mut rh = Vec::new();
    let mut lh = Vec::new();
    for note in notes {
        match note.hand() {
            Hand::Rh => rh.push(note.clone()),
            Hand::Lh => lh.push(note.clone()),
        }
    }
    (rh, lh)
}

/// Interleave the two hand solutions back into input order
fn merge_solutions(
    notes: &[Note],
    rh: &FingeringSolution,
    lh: &FingeringSolution,
) -> FingeringSolution {
    let mut fingers = Vec::with_capacity(notes.len());
    let mut reasons = Vec::with_capacity(notes.len());
    let mut rh_pos = 0;
    let mut lh_pos = 0;

    for note in notes {
        let (solution, pos) = match note.hand() {
            Hand::Rh => (rh, &mut rh_pos),
            Hand::Lh => (lh, &mut lh_pos),
        };
        fingers.push(solution.fingers[*pos]);
        reasons.push(solution.reasons[*pos].clone());
        *pos += 1;
    }

    FingeringSolution {
        fingers,
        total_cost: rh.total_cost + lh.total_cost,
        reasons,
    }
}

/// Combine both hands' segments, sorted by start index with right
/// hand first on ties
fn merge_segments(
    rh: Vec<PatternSegment>,
    lh: Vec<PatternSegment>,
) -> Vec<PatternSegment> {
    let mut merged = rh;
    merged.extend(lh);
    merged.sort_by_key(|seg| (seg.start_index, seg.hand == Hand::Lh));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatternType;

    fn two_hand_stream() -> Vec<Note> {
        let mut notes = Vec::new();
        // interleaved: RH melody on staff 1, LH bass on staff 2
        let rh = [72u8, 74, 76, 77, 79, 81, 83, 84];
        let lh = [48u8, 55, 52, 55, 48, 55, 52, 55];
        for i in 0..8 {
            notes.push(Note::new(rh[i], 1.0).with_position(1 + i as u32 / 4, (i % 4) as f64));
            notes.push(
                Note::new(lh[i], 1.0)
                    .with_staff(2)
                    .with_position(1 + i as u32 / 4, (i % 4) as f64),
            );
        }
        notes
    }

    #[test]
    fn test_empty_input() {
        let result = analyze(&[], Difficulty::Intermediate);
        assert!(result.solution.is_empty());
        assert_eq!(result.solution.total_cost, 0);
        assert!(result.segments.is_empty());
    }

    #[test]
    fn test_merged_output_preserves_input_order() {
        let notes = two_hand_stream();
        let result = analyze(&notes, Difficulty::Intermediate);
        assert_eq!(result.solution.fingers.len(), notes.len());
        assert_eq!(result.solution.reasons.len(), notes.len());

        // re-extracting each hand must reproduce the per-hand plans
        let (rh_notes, lh_notes) = split_hands(&notes);
        let recognizer = PatternRecognizer::new();
        let planner = FingeringPlanner::new(Difficulty::Intermediate);
        let rh_solution = planner.plan(&rh_notes, &recognizer.analyze(&rh_notes));
        let lh_solution = planner.plan(&lh_notes, &recognizer.analyze(&lh_notes));

        let rh_extracted: Vec<u8> = notes
            .iter()
            .zip(&result.solution.fingers)
            .filter(|(n, _)| n.hand() == Hand::Rh)
            .map(|(_, &f)| f)
            .collect();
        assert_eq!(rh_extracted, rh_solution.fingers);

        let lh_extracted: Vec<u8> = notes
            .iter()
            .zip(&result.solution.fingers)
            .filter(|(n, _)| n.hand() == Hand::Lh)
            .map(|(_, &f)| f)
            .collect();
        assert_eq!(lh_extracted, lh_solution.fingers);

        assert_eq!(
            result.solution.total_cost,
            rh_solution.total_cost + lh_solution.total_cost
        );
    }

    #[test]
    fn test_segments_sorted_rh_before_lh() {
        let result = analyze(&two_hand_stream(), Difficulty::Intermediate);
        assert!(!result.segments.is_empty());
        for pair in result.segments.windows(2) {
            assert!(pair[0].start_index <= pair[1].start_index);
            if pair[0].start_index == pair[1].start_index {
                assert!(!(pair[0].hand == Hand::Lh && pair[1].hand == Hand::Rh));
            }
        }
        assert!(result.segments.iter().any(|s| s.hand == Hand::Rh));
        assert!(result.segments.iter().any(|s| s.hand == Hand::Lh));
    }

    #[test]
    fn test_left_hand_alberti_gets_alberti_segment() {
        let result = analyze(&two_hand_stream(), Difficulty::Intermediate);
        assert!(result
            .segments
            .iter()
            .any(|s| s.hand == Hand::Lh && s.pattern_type == PatternType::Alberti));
    }

    #[test]
    fn test_single_hand_input() {
        let notes: Vec<Note> = [60u8, 62, 64, 65]
            .iter()
            .enumerate()
            .map(|(i, &p)| Note::new(p, 1.0).with_position(1, i as f64))
            .collect();
        let result = analyze(&notes, Difficulty::Beginner);
        assert_eq!(result.solution.fingers.len(), 4);
        assert!(result.segments.iter().all(|s| s.hand == Hand::Rh));
    }

    #[test]
    fn test_deterministic_end_to_end() {
        let notes = two_hand_stream();
        let a = analyze(&notes, Difficulty::Advanced);
        let b = analyze(&notes, Difficulty::Advanced);
        assert_eq!(a, b);
    }
}
