//! The planner's cost model
//!
//! Costs are additive integers. Every rule that fires may append a
//! tag explaining itself; the tags become the per-note rationale
//! after backtracking. All weights come from the difficulty profile
//! or are fixed design constants.

use crate::models::{Difficulty, Hand, Note, PatternSegment, PatternType};
use crate::utils::pitch_utils::is_black_key;

use super::hand::{expected_finger, hand_position_anchors, scale_mask};
use super::profile::{natural_span, DifficultyProfile};

/// Rewarded finger pairs for scale runs moving away from the thumb
/// (right hand ascending, left hand descending). Thumb tucks are
/// rewarded after finger 3; tucking after 4 reads as a late cross
/// and gets no reward.
const SCALE_PAIRS_OUTWARD: [(u8, u8); 5] = [(1, 2), (2, 3), (3, 1), (3, 4), (4, 5)];

/// Rewarded finger pairs for scale runs moving toward the thumb
/// (right hand descending, left hand ascending)
const SCALE_PAIRS_INWARD: [(u8, u8); 7] =
    [(5, 4), (4, 3), (3, 2), (2, 1), (1, 3), (1, 2), (1, 4)];

/// A rule evaluation: cost delta plus the tags that fired
pub type RuleOutcome = (i32, Vec<&'static str>);

/// Precomputed per-stream context for cost evaluation
pub struct CostModel<'a> {
    notes: &'a [Note],
    segments: &'a [PatternSegment],
    hand: Hand,
    difficulty: Difficulty,
    profile: DifficultyProfile,
    anchors: Vec<u8>,
    in_scale: Vec<bool>,
}

impl<'a> CostModel<'a> {
    pub fn new(
        notes: &'a [Note],
        segments: &'a [PatternSegment],
        hand: Hand,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            notes,
            segments,
            hand,
            difficulty,
            profile: DifficultyProfile::for_difficulty(difficulty),
            anchors: hand_position_anchors(notes, hand),
            in_scale: scale_mask(notes),
        }
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    /// Pattern label covering a note index, by index lookup only
    fn pattern_context(&self, index: usize) -> PatternType {
        self.segments
            .iter()
            .find(|seg| seg.contains(index))
            .map(|seg| seg.pattern_type)
            .unwrap_or(PatternType::Unknown)
    }

    /// Cost of opening a stream (or chunk) with finger `f` on the
    /// note at `index`
    pub fn initial_cost(&self, f: u8, index: usize) -> RuleOutcome {
        let note = &self.notes[index];
        let mut cost = 0;
        let mut reasons = Vec::new();

        let expected = expected_finger(self.hand, self.anchors[index], note.pitch);
        if f == expected {
            cost -= 25;
            reasons.push("Matches position");
        } else {
            cost += 12 * (f as i32 - expected as i32).abs();
        }

        if self.difficulty == Difficulty::Beginner {
            if f == 4 {
                cost += self.profile.finger4_penalty;
            }
            if f == 5 {
                cost += self.profile.finger5_penalty;
            }
            if (1..=3).contains(&f) {
                cost -= 5;
            }
        }

        if is_black_key(note.pitch) {
            if f == 1 || f == 5 {
                cost += if self.profile.allow_thumb_on_black { 10 } else { 25 };
                reasons.push("Short finger on black key");
            } else {
                cost -= 8;
                reasons.push("Long finger on black key");
            }
        }

        (cost, reasons)
    }

    /// Cost of moving from finger `g` on note `index - 1` to finger
    /// `f` on note `index`
    pub fn transition(&self, g: u8, f: u8, index: usize) -> RuleOutcome {
        let prev = &self.notes[index - 1];
        let curr = &self.notes[index];
        let interval = curr.pitch as i32 - prev.pitch as i32;
        let magnitude = interval.abs();
        let ascending = interval > 0;
        let delta_f = f as i32 - g as i32;
        let pattern = self.pattern_context(index);
        let in_scale = self.in_scale[index];
        let scale_context = in_scale || pattern == PatternType::Scale;
        let crossing = (g == 1) != (f == 1);

        let mut cost = 0;
        let mut reasons = Vec::new();

        // 1. same finger on a moving pitch
        if f == g && interval != 0 {
            cost += 40 + 5 * magnitude;
            reasons.push("Same finger leap");
        }

        // 2. repeated pitch
        if interval == 0 {
            if f == g {
                cost += 25;
                reasons.push("Same finger repeat");
            } else {
                cost -= 10;
                reasons.push("Finger change on repeat");
            }
        }

        // 3. natural progression, else thumb crossing
        if interval != 0 {
            let natural = match (self.hand, ascending) {
                (Hand::Rh, true) | (Hand::Lh, false) => delta_f > 0,
                (Hand::Rh, false) | (Hand::Lh, true) => delta_f < 0,
            };
            if natural {
                cost -= 20;
                reasons.push("Natural progression");
            } else if crossing {
                cost += if scale_context {
                    self.profile.thumb_crossing_penalty / 3
                } else {
                    self.profile.thumb_crossing_penalty
                };
                reasons.push("Thumb crossing");
            }
        }

        // 4. stretch beyond the natural span
        let span = natural_span(g, f);
        let over = magnitude - span;
        if over > 0 {
            if over > self.profile.max_comfortable_span - span {
                cost += 200;
                reasons.push("Impossible stretch");
            } else {
                cost += over * self.profile.stretch_penalty;
                reasons.push("Stretch");
            }
        }

        // 5. position adherence (scale runs reposition fluidly)
        if !in_scale {
            let expected = expected_finger(self.hand, self.anchors[index], curr.pitch);
            if f == expected {
                cost -= 15;
                reasons.push("Matches position");
            } else {
                cost += 8 * (f as i32 - expected as i32).abs();
                reasons.push("Away from position");
            }
        }

        // 6. scale shaping
        if scale_context {
            let outward = match self.hand {
                Hand::Rh => ascending,
                Hand::Lh => !ascending,
            };
            let pairs: &[(u8, u8)] = if outward {
                &SCALE_PAIRS_OUTWARD
            } else {
                &SCALE_PAIRS_INWARD
            };
            if pairs.contains(&(g, f)) {
                cost -= 25;
                reasons.push("Scale fingering");
            }
            if f == g {
                cost += 50;
                reasons.push("Same finger in scale run");
            }
            if self.profile.prefer_simple_patterns && crossing {
                cost += 20;
                reasons.push("Crossing in scale run");
            }
        }

        // 7. black-key preference
        if is_black_key(curr.pitch) {
            if f == 1 {
                cost += if self.profile.allow_thumb_on_black { 15 } else { 35 };
                reasons.push("Short finger on black key");
            } else if f == 5 {
                cost += 20;
                reasons.push("Short finger on black key");
            } else {
                cost -= 5;
                reasons.push("Long finger on black key");
            }
        }

        // 8. difficulty shaping
        if self.difficulty == Difficulty::Beginner {
            if f == 4 {
                cost += self.profile.finger4_penalty;
                reasons.push("Weak finger");
            }
            if f == 5 && !is_black_key(curr.pitch) {
                cost += self.profile.finger5_penalty;
                reasons.push("Weak finger");
            }
            if delta_f.abs() <= 1 && magnitude <= 2 {
                cost -= 10;
                reasons.push("Simple transition");
            }
        }
        if self.difficulty == Difficulty::Advanced && magnitude > 5 && crossing {
            cost -= 10;
            reasons.push("Efficient crossing");
        }

        // 9. arpeggio shaping
        if pattern == PatternType::Arpeggio {
            let good = match (self.hand, ascending) {
                (Hand::Rh, true) | (Hand::Lh, false) => g < f || (g >= 3 && f == 1),
                (Hand::Rh, false) | (Hand::Lh, true) => g > f || (g == 1 && f >= 3),
            };
            if good {
                cost -= 15;
                reasons.push("Good arpeggio");
            }
        }

        (cost, reasons)
    }
}
