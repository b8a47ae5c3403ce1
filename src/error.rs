//! Error types for the analysis API boundary
//!
//! The analysis core itself is total and reports no errors; only the
//! API layer can fail, and only on malformed input.

use thiserror::Error;

/// Errors raised while validating API input
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    /// Difficulty string is not one of beginner/intermediate/advanced
    #[error("unknown difficulty: '{0}'")]
    InvalidDifficulty(String),

    /// The note array could not be deserialized
    #[error("invalid note stream: {0}")]
    InvalidNotes(String),

    /// A pitch lies outside the MIDI range 0..=127
    #[error("pitch {pitch} at note {index} is outside the MIDI range 0-127")]
    PitchOutOfRange { index: usize, pitch: u8 },
}
