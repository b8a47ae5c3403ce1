//! Models module for fingering analysis
//!
//! This module contains the data records shared by the pattern
//! recognizer, the fingering planner, and the WASM API.

pub mod core;
pub mod elements;
pub mod segment;
pub mod solution;

// Re-export commonly used types
pub use self::core::Note;
pub use elements::*;
pub use segment::{PatternDetail, PatternSegment};
pub use solution::{AnalysisResult, FingeringSolution};
