//! Element types and enumerations for fingering analysis
//!
//! This module defines the core enums used throughout the pattern
//! recognizer and fingering planner.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which hand plays a note (staff 1 = right, staff 2 = left)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Hand {
    /// Right hand (upper staff)
    Rh,
    /// Left hand (lower staff)
    Lh,
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hand::Rh => write!(f, "RH"),
            Hand::Lh => write!(f, "LH"),
        }
    }
}

/// Difficulty level selecting a planner cost profile
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty: '{}'", other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

/// Musical pattern categories produced by the recognizer
///
/// The planner's cost function branches on this closed set, so every
/// variant must be handled exhaustively there.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Scale,
    Arpeggio,
    Repeated,
    Leap,
    Chordal,
    Melodic,
    Unknown,
    Alberti,
    Ornamented,
    Ostinato,
    Polyphonic,
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternType::Scale => "scale",
            PatternType::Arpeggio => "arpeggio",
            PatternType::Repeated => "repeated",
            PatternType::Leap => "leap",
            PatternType::Chordal => "chordal",
            PatternType::Melodic => "melodic",
            PatternType::Unknown => "unknown",
            PatternType::Alberti => "alberti",
            PatternType::Ornamented => "ornamented",
            PatternType::Ostinato => "ostinato",
            PatternType::Polyphonic => "polyphonic",
        };
        f.write_str(name)
    }
}

/// Melodic direction of a recognized pattern
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
    Bidirectional,
}

/// Scale family identified from the interval vector
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    Chromatic,
    Major,
    Minor,
    Pentatonic,
    Modal,
}

/// Chord quality identified from stacked pitch classes
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    DominantSeventh,
    MajorSeventh,
    MinorSeventh,
}

/// Ornament subtype for ORNAMENTED windows
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrnamentType {
    Trill,
    Mordent,
    Turn,
    Grace,
}

/// Repeated-note subtype
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RepeatKind {
    /// One pitch restruck several times in a row
    Single,
    /// Strict alternation between two distinct pitches
    Alternating,
}

/// Shape of a leap-dominated window
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Contour {
    Jagged,
    Arch,
    Valley,
    Linear,
}

/// Expressive character of a melodic window
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MelodicStyle {
    Cantabile,
    Expressive,
    Lyrical,
    Neutral,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("beginner".parse::<Difficulty>(), Ok(Difficulty::Beginner));
        assert_eq!("Advanced".parse::<Difficulty>(), Ok(Difficulty::Advanced));
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_hand_display() {
        assert_eq!(Hand::Rh.to_string(), "RH");
        assert_eq!(Hand::Lh.to_string(), "LH");
    }

    #[test]
    fn test_pattern_type_serialization() {
        let json = serde_json::to_string(&PatternType::Alberti).unwrap();
        assert_eq!(json, "\"alberti\"");
    }
}
