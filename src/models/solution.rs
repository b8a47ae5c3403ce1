//! Fingering solution records produced by the planner
//!
//! The solution vector is aligned index-for-index with the note
//! stream that produced it: `fingers[i]` and `reasons[i]` describe
//! note `i`.

use serde::{Deserialize, Serialize};

use super::segment::PatternSegment;

/// Finger assignment for a note stream
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FingeringSolution {
    /// Finger label per note: 1 = thumb .. 5 = pinky
    pub fingers: Vec<u8>,

    /// Total cost of the assignment under the active profile
    pub total_cost: i32,

    /// Ordered rule tags explaining each note's assignment
    pub reasons: Vec<Vec<String>>,
}

impl FingeringSolution {
    /// Empty solution for an empty stream
    pub fn empty() -> Self {
        Self {
            fingers: Vec::new(),
            total_cost: 0,
            reasons: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.fingers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingers.is_empty()
    }
}

/// Combined output of the analysis pipeline
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Merged two-hand fingering, aligned to the input stream
    pub solution: FingeringSolution,

    /// Both hands' segments, sorted by start index (RH before LH on ties)
    pub segments: Vec<PatternSegment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_solution() {
        let sol = FingeringSolution::empty();
        assert!(sol.is_empty());
        assert_eq!(sol.total_cost, 0);
    }
}
