//! Core data structures for fingering analysis
//!
//! This module defines the Note record consumed by the analysis
//! pipeline. Notes are produced upstream by the score decoder and are
//! immutable inside the core: both the pattern recognizer and the
//! fingering planner only read them.

use serde::{Deserialize, Serialize};

// Re-export from other modules
pub use super::elements::{
    ChordQuality, Contour, Difficulty, Direction, Hand, MelodicStyle, OrnamentType, PatternType,
    RepeatKind, ScaleType,
};

/// A single pitched note event from the parsed score
///
/// Rests are filtered out before the core sees the stream; `is_rest`
/// remains on the record so the API boundary can do that filtering.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// MIDI pitch number (middle C = 60)
    pub pitch: u8,

    /// Duration in abstract beat units (quarter note = 1.0)
    pub duration: f64,

    /// Voice number within the staff (1-based)
    #[serde(default = "default_one")]
    pub voice: u8,

    /// Staff number: 1 = upper (right hand), 2 = lower (left hand)
    #[serde(default = "default_one")]
    pub staff: u8,

    /// Measure number (1-based)
    #[serde(default = "default_measure")]
    pub measure_number: u32,

    /// Beat position within the measure
    #[serde(default)]
    pub beat: f64,

    #[serde(default)]
    pub is_chord: bool,
    #[serde(default)]
    pub is_grace: bool,
    #[serde(default)]
    pub is_rest: bool,
    #[serde(default)]
    pub has_slur: bool,
    #[serde(default)]
    pub has_trill: bool,
    #[serde(default)]
    pub has_mordent: bool,
    #[serde(default)]
    pub has_turn: bool,
    #[serde(default)]
    pub has_accent: bool,
    #[serde(default)]
    pub has_staccato: bool,
    #[serde(default)]
    pub tie_start: bool,
    #[serde(default)]
    pub tie_stop: bool,
    #[serde(default)]
    pub slur_start: bool,
    #[serde(default)]
    pub slur_stop: bool,
}

fn default_one() -> u8 {
    1
}

fn default_measure() -> u32 {
    1
}

impl Note {
    /// Create a new note with default voice/staff/flags
    pub fn new(pitch: u8, duration: f64) -> Self {
        Self {
            pitch,
            duration,
            voice: 1,
            staff: 1,
            measure_number: 1,
            beat: 0.0,
            is_chord: false,
            is_grace: false,
            is_rest: false,
            has_slur: false,
            has_trill: false,
            has_mordent: false,
            has_turn: false,
            has_accent: false,
            has_staccato: false,
            tie_start: false,
            tie_stop: false,
            slur_start: false,
            slur_stop: false,
        }
    }

    /// Hand assignment, derived from the staff tag (staff 2 = left)
    pub fn hand(&self) -> Hand {
        if self.staff == 2 {
            Hand::Lh
        } else {
            Hand::Rh
        }
    }

    /// True if any ornament flag (trill, mordent, turn) is set
    pub fn has_ornament(&self) -> bool {
        self.has_trill || self.has_mordent || self.has_turn
    }

    pub fn with_staff(mut self, staff: u8) -> Self {
        self.staff = staff;
        self
    }

    pub fn with_voice(mut self, voice: u8) -> Self {
        self.voice = voice;
        self
    }

    pub fn with_position(mut self, measure_number: u32, beat: f64) -> Self {
        self.measure_number = measure_number;
        self.beat = beat;
        self
    }

    pub fn with_slur(mut self) -> Self {
        self.has_slur = true;
        self
    }

    pub fn with_trill(mut self) -> Self {
        self.has_trill = true;
        self
    }

    pub fn with_mordent(mut self) -> Self {
        self.has_mordent = true;
        self
    }

    pub fn with_turn(mut self) -> Self {
        self.has_turn = true;
        self
    }

    pub fn with_grace(mut self) -> Self {
        self.is_grace = true;
        self
    }

    pub fn with_chord(mut self) -> Self {
        self.is_chord = true;
        self
    }
}
