//! Fingering planning for a hand-local note stream
//!
//! Turns a note stream and its recognized pattern segments into a
//! minimum-cost finger assignment under a difficulty profile:
//!
//! - `profile`: the three calibrated difficulty profiles and the
//!   natural finger-span table
//! - `hand`: hand-position anchors, the five-finger expected map,
//!   and the scale mask
//! - `cost`: initial and transition costs with per-rule reason tags
//! - `planner`: the layered dynamic program, chunking, backtrack

pub mod cost;
pub mod hand;
pub mod planner;
pub mod profile;

pub use cost::CostModel;
pub use hand::{expected_finger, hand_position_anchors, scale_mask};
pub use planner::{FingeringPlanner, FULL_DP_LIMIT};
pub use profile::{natural_span, DifficultyProfile};
