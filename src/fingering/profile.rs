//! Difficulty profiles and the natural finger-span table
//!
//! All planner weights are fixed design constants; the profile is
//! the only tuning surface and carries exactly the knobs listed
//! here. Costs are integers so tie-breaking is exact.

use serde::{Deserialize, Serialize};

use crate::models::Difficulty;

/// Cost-model parameters for one difficulty level
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyProfile {
    pub thumb_crossing_penalty: i32,
    pub position_change_penalty: i32,
    pub finger4_penalty: i32,
    pub finger5_penalty: i32,
    /// Per extra semitone beyond the natural span
    pub stretch_penalty: i32,
    /// Largest tolerable stretch beyond the natural span, semitones
    pub max_comfortable_span: i32,
    pub prefer_simple_patterns: bool,
    pub allow_thumb_on_black: bool,
}

impl DifficultyProfile {
    /// Profile for a difficulty level
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Beginner => Self {
                thumb_crossing_penalty: 80,
                position_change_penalty: 60,
                finger4_penalty: 15,
                finger5_penalty: 10,
                stretch_penalty: 25,
                max_comfortable_span: 5,
                prefer_simple_patterns: true,
                allow_thumb_on_black: false,
            },
            Difficulty::Intermediate => Self {
                thumb_crossing_penalty: 30,
                position_change_penalty: 30,
                finger4_penalty: 5,
                finger5_penalty: 5,
                stretch_penalty: 12,
                max_comfortable_span: 7,
                prefer_simple_patterns: false,
                allow_thumb_on_black: false,
            },
            Difficulty::Advanced => Self {
                thumb_crossing_penalty: 10,
                position_change_penalty: 15,
                finger4_penalty: 0,
                finger5_penalty: 0,
                stretch_penalty: 5,
                max_comfortable_span: 9,
                prefer_simple_patterns: false,
                allow_thumb_on_black: true,
            },
        }
    }
}

/// Comfortable semitone span between two fingers in a relaxed hand.
/// Symmetric; same-finger pairs span 0.
pub fn natural_span(a: u8, b: u8) -> i32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    match (lo, hi) {
        (1, 2) => 2,
        (2, 3) => 2,
        (3, 4) => 1,
        (4, 5) => 2,
        (1, 3) => 4,
        (2, 4) => 3,
        (3, 5) => 3,
        (1, 4) => 5,
        (2, 5) => 5,
        (1, 5) => 8,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_are_calibrated() {
        let beginner = DifficultyProfile::for_difficulty(Difficulty::Beginner);
        let advanced = DifficultyProfile::for_difficulty(Difficulty::Advanced);
        assert_eq!(beginner.thumb_crossing_penalty, 80);
        assert_eq!(advanced.thumb_crossing_penalty, 10);
        assert!(beginner.prefer_simple_patterns);
        assert!(!advanced.prefer_simple_patterns);
        assert!(advanced.allow_thumb_on_black);
        assert!(beginner.max_comfortable_span < advanced.max_comfortable_span);
    }

    #[test]
    fn test_natural_span_is_symmetric() {
        for a in 1..=5u8 {
            for b in 1..=5u8 {
                assert_eq!(natural_span(a, b), natural_span(b, a));
            }
        }
        assert_eq!(natural_span(1, 5), 8);
        assert_eq!(natural_span(3, 4), 1);
        assert_eq!(natural_span(2, 2), 0);
    }
}
