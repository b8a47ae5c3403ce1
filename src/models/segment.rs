//! Pattern segment records produced by the recognizer
//!
//! A segment labels a contiguous run of a hand-local note stream with
//! a pattern type, a confidence, and pattern-specific detail. After
//! post-processing, segments cover the stream without overlapping.

use serde::{Deserialize, Serialize};

use super::elements::{
    ChordQuality, Contour, Direction, Hand, MelodicStyle, OrnamentType, PatternType, RepeatKind,
    ScaleType,
};

/// Pattern-specific attributes, tagged by the pattern family
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PatternDetail {
    Scale {
        direction: Direction,
        scale_type: ScaleType,
        /// Pitch class of the identified tonic, when the interval
        /// vector matched a major/minor step pattern
        #[serde(skip_serializing_if = "Option::is_none")]
        tonic: Option<u8>,
    },
    Arpeggio {
        direction: Direction,
        #[serde(skip_serializing_if = "Option::is_none")]
        quality: Option<ChordQuality>,
        /// Root pitch class of the outlined chord
        #[serde(skip_serializing_if = "Option::is_none")]
        root: Option<u8>,
    },
    Repeated {
        repeat_kind: RepeatKind,
        count: usize,
    },
    Leap {
        contour: Contour,
    },
    Chordal {
        #[serde(skip_serializing_if = "Option::is_none")]
        quality: Option<ChordQuality>,
        #[serde(skip_serializing_if = "Option::is_none")]
        root: Option<u8>,
        inversion: u8,
        mean_simultaneity: f64,
    },
    Melodic {
        style: MelodicStyle,
    },
    Alberti {
        match_ratio: f64,
    },
    Ornamented {
        ornament: OrnamentType,
    },
    Ostinato {
        period: usize,
        repeats: usize,
    },
    Polyphonic {
        voices: usize,
    },
    None,
}

/// A labeled, contiguous span of a hand-local note stream
///
/// Indices are inclusive and refer to positions in the per-hand
/// stream, not the merged input.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternSegment {
    pub start_index: usize,
    pub end_index: usize,
    pub pattern_type: PatternType,
    /// Detector confidence in [0, 1]
    pub confidence: f64,
    pub hand: Hand,
    pub features: PatternDetail,
}

impl PatternSegment {
    pub fn new(
        start_index: usize,
        end_index: usize,
        pattern_type: PatternType,
        confidence: f64,
        features: PatternDetail,
    ) -> Self {
        Self {
            start_index,
            end_index,
            pattern_type,
            confidence,
            hand: Hand::Rh,
            features,
        }
    }

    /// Number of notes covered (indices are inclusive)
    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// Whether the segment covers the given hand-local note index
    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }
}
