//! Shortest-path finger assignment over (note, finger) states
//!
//! A layered dynamic program: layer i holds the best cost of ending
//! on each of the five fingers at note i, with a parent finger per
//! state pointing into the previous layer only. Ties are broken by
//! scanning predecessor fingers 1..5 and keeping the first minimum;
//! the final finger is the lowest among equal-cost winners. These
//! tie-breaks are part of the output contract.

use crate::models::{Difficulty, FingeringSolution, Note, PatternSegment};

use super::cost::CostModel;

/// Streams at most this long get the exact DP
pub const FULL_DP_LIMIT: usize = 64;

/// Chunk length for long streams
const CHUNK_SIZE: usize = 32;

/// Notes shared between consecutive chunks
const CHUNK_OVERLAP: usize = 4;

/// Single-step transitions costing more than this are infeasible
const PRUNE_LIMIT: i32 = 500;

const INFEASIBLE: i32 = i32::MAX / 2;

/// Plans finger assignments for one hand's note stream
#[derive(Debug, Clone, Copy)]
pub struct FingeringPlanner {
    difficulty: Difficulty,
}

impl FingeringPlanner {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// Assign a finger to every note of a hand-local stream.
    ///
    /// Long streams are chunked into overlapping windows solved
    /// independently, trading strict optimality for linear scaling.
    pub fn plan(&self, notes: &[Note], segments: &[PatternSegment]) -> FingeringSolution {
        if notes.is_empty() {
            return FingeringSolution::empty();
        }

        let hand = notes[0].hand();
        let model = CostModel::new(notes, segments, hand, self.difficulty);

        if notes.len() <= FULL_DP_LIMIT {
            return solve_range(&model, 0, notes.len());
        }

        log::debug!(
            "chunking {}-note stream into windows of {}",
            notes.len(),
            CHUNK_SIZE
        );
        let mut fingers = Vec::with_capacity(notes.len());
        let mut reasons = Vec::with_capacity(notes.len());
        let mut total_cost = 0;
        let mut start = 0;
        loop {
            let end = (start + CHUNK_SIZE).min(notes.len());
            let chunk = solve_range(&model, start, end);
            let skip = if start == 0 { 0 } else { CHUNK_OVERLAP };
            fingers.extend_from_slice(&chunk.fingers[skip..]);
            reasons.extend_from_slice(&chunk.reasons[skip..]);
            total_cost += chunk.total_cost;
            if end == notes.len() {
                break;
            }
            start += CHUNK_SIZE - CHUNK_OVERLAP;
        }

        FingeringSolution {
            fingers,
            total_cost,
            reasons,
        }
    }
}

/// Exact DP over the note range `[start, end)` of the model's stream
fn solve_range(model: &CostModel, start: usize, end: usize) -> FingeringSolution {
    let len = end - start;
    let mut costs = vec![[INFEASIBLE; 5]; len];
    let mut parents = vec![[0u8; 5]; len];

    for f in 1..=5u8 {
        costs[0][(f - 1) as usize] = model.initial_cost(f, start).0;
    }

    for i in 1..len {
        let index = start + i;
        for f in 1..=5u8 {
            let mut best = INFEASIBLE;
            let mut best_parent = 0u8;
            for g in 1..=5u8 {
                let prev = costs[i - 1][(g - 1) as usize];
                if prev >= INFEASIBLE {
                    continue;
                }
                let (step, _) = model.transition(g, f, index);
                if step > PRUNE_LIMIT {
                    continue;
                }
                let candidate = prev + step;
                if candidate < best {
                    best = candidate;
                    best_parent = g;
                }
            }
            costs[i][(f - 1) as usize] = best;
            parents[i][(f - 1) as usize] = best_parent;
        }

        // Cannot happen on well-formed input: repeated-pitch and
        // scale-shaping transitions stay under the prune bound for
        // every finger pair. Kept as a documented total fallback.
        if costs[i].iter().all(|&c| c >= INFEASIBLE) {
            costs[i] = [0; 5];
            parents[i] = [3; 5];
        }
    }

    // lowest finger among equal-cost final states
    let mut final_finger = 1u8;
    let mut best = costs[len - 1][0];
    for f in 2..=5u8 {
        if costs[len - 1][(f - 1) as usize] < best {
            best = costs[len - 1][(f - 1) as usize];
            final_finger = f;
        }
    }

    let mut fingers = vec![0u8; len];
    fingers[len - 1] = final_finger;
    for i in (1..len).rev() {
        fingers[i - 1] = parents[i][(fingers[i] - 1) as usize];
    }

    // rebuild the rationale along the chosen path
    let mut reasons = Vec::with_capacity(len);
    let (_, first) = model.initial_cost(fingers[0], start);
    reasons.push(first.into_iter().map(String::from).collect());
    for i in 1..len {
        let (_, tags) = model.transition(fingers[i - 1], fingers[i], start + i);
        reasons.push(tags.into_iter().map(String::from).collect());
    }

    FingeringSolution {
        fingers,
        total_cost: best,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PatternDetail, PatternType};
    use crate::patterns::PatternRecognizer;

    fn notes_from(pitches: &[u8]) -> Vec<Note> {
        pitches
            .iter()
            .enumerate()
            .map(|(i, &p)| Note::new(p, 1.0).with_position(1 + (i / 4) as u32, (i % 4) as f64))
            .collect()
    }

    fn plan(pitches: &[u8], difficulty: Difficulty) -> FingeringSolution {
        let notes = notes_from(pitches);
        let segments = PatternRecognizer::new().analyze(&notes);
        FingeringPlanner::new(difficulty).plan(&notes, &segments)
    }

    #[test]
    fn test_empty_stream() {
        let solution = FingeringPlanner::new(Difficulty::Intermediate).plan(&[], &[]);
        assert!(solution.is_empty());
        assert_eq!(solution.total_cost, 0);
    }

    #[test]
    fn test_single_note_uses_initial_cost() {
        let solution = plan(&[60], Difficulty::Intermediate);
        assert_eq!(solution.fingers, vec![1]);
        assert_eq!(solution.total_cost, -25);
        assert_eq!(solution.reasons[0], vec!["Matches position".to_string()]);
    }

    #[test]
    fn test_every_finger_in_range() {
        let solution = plan(&[60, 65, 72, 63, 80, 58, 61, 70], Difficulty::Advanced);
        assert_eq!(solution.fingers.len(), 8);
        assert!(solution.fingers.iter().all(|&f| (1..=5).contains(&f)));
    }

    #[test]
    fn test_deterministic() {
        let a = plan(&[60, 64, 62, 67, 65, 69, 71, 60], Difficulty::Intermediate);
        let b = plan(&[60, 64, 62, 67, 65, 69, 71, 60], Difficulty::Intermediate);
        assert_eq!(a, b);
    }

    #[test]
    fn test_chunking_threshold() {
        // 64 notes: exact DP; 65: chunked. Both must stay well-formed.
        let base: Vec<u8> = (0..64).map(|i| 60 + (i % 12) as u8).collect();
        let exact = plan(&base, Difficulty::Intermediate);
        assert_eq!(exact.fingers.len(), 64);

        let long: Vec<u8> = (0..65).map(|i| 60 + (i % 12) as u8).collect();
        let chunked = plan(&long, Difficulty::Intermediate);
        assert_eq!(chunked.fingers.len(), 65);
        assert_eq!(chunked.reasons.len(), 65);
        assert!(chunked.fingers.iter().all(|&f| (1..=5).contains(&f)));
    }

    #[test]
    fn test_scale_label_never_costs_more_than_unknown() {
        let notes = notes_from(&[60, 62, 64, 65, 67, 69, 71, 72]);
        let planner = FingeringPlanner::new(Difficulty::Intermediate);

        let as_scale = vec![PatternSegment::new(
            0,
            7,
            PatternType::Scale,
            0.92,
            PatternDetail::None,
        )];
        let as_unknown = vec![PatternSegment::new(
            0,
            7,
            PatternType::Unknown,
            0.5,
            PatternDetail::None,
        )];

        let scale_cost = planner.plan(&notes, &as_scale).total_cost;
        let unknown_cost = planner.plan(&notes, &as_unknown).total_cost;
        assert!(scale_cost <= unknown_cost);
    }

    #[test]
    fn test_repeated_notes_alternate_fingers() {
        let solution = plan(&[60, 60, 60, 60, 60], Difficulty::Beginner);
        for pair in solution.fingers.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }
}
