//! Window classification: the priority-ordered decision tree
//!
//! Each window is tested against eleven pattern detectors in a fixed
//! priority order; the first match wins. Detectors return a
//! confidence and pattern-specific detail alongside the label.

use crate::models::{
    ChordQuality, Contour, Direction, MelodicStyle, Note, OrnamentType, PatternDetail,
    PatternType, RepeatKind, ScaleType,
};
use crate::utils::pitch_utils::pitch_class;

use super::features::{beat_key, intervals, WindowFeatures};

/// Classification outcome for one window
#[derive(Debug, Clone)]
pub struct Classification {
    pub pattern_type: PatternType,
    pub confidence: f64,
    pub detail: PatternDetail,
}

impl Classification {
    fn new(pattern_type: PatternType, confidence: f64, detail: PatternDetail) -> Self {
        Self {
            pattern_type,
            confidence,
            detail,
        }
    }
}

/// Run the decision tree over one window. Total: always returns a
/// classification, falling back to UNKNOWN at confidence 0.5.
pub fn classify_window(notes: &[Note], feats: &WindowFeatures) -> Classification {
    detect_ornamented(notes, feats)
        .or_else(|| detect_alberti(notes, feats))
        .or_else(|| detect_ostinato(notes))
        .or_else(|| detect_polyphonic(notes))
        .or_else(|| detect_chordal(notes, feats))
        .or_else(|| detect_scale(notes, feats))
        .or_else(|| detect_arpeggio(notes, feats))
        .or_else(|| detect_repeated(notes, feats))
        .or_else(|| detect_leap(notes, feats))
        .or_else(|| detect_melodic(feats))
        .unwrap_or_else(|| {
            Classification::new(PatternType::Unknown, 0.5, PatternDetail::None)
        })
}

/// Priority 1: explicit ornament/grace flags, or an unmarked trill
/// figure (very fast, narrow, strictly alternating).
fn detect_ornamented(notes: &[Note], feats: &WindowFeatures) -> Option<Classification> {
    if feats.any_ornament || feats.any_grace {
        let ornament = if notes.iter().any(|n| n.has_trill) {
            OrnamentType::Trill
        } else if notes.iter().any(|n| n.has_mordent) {
            OrnamentType::Mordent
        } else if notes.iter().any(|n| n.has_turn) {
            OrnamentType::Turn
        } else {
            OrnamentType::Grace
        };
        return Some(Classification::new(
            PatternType::Ornamented,
            1.0,
            PatternDetail::Ornamented { ornament },
        ));
    }

    let ivals = intervals(notes);
    let alternating = !ivals.is_empty()
        && ivals.iter().all(|&i| i.abs() >= 1 && i.abs() <= 2)
        && ivals.windows(2).all(|pair| pair[1] == -pair[0]);
    if feats.duration_mean < 0.125 && feats.max_interval <= 2 && alternating {
        return Some(Classification::new(
            PatternType::Ornamented,
            0.75,
            PatternDetail::Ornamented {
                ornament: OrnamentType::Trill,
            },
        ));
    }

    None
}

/// Priority 2: Alberti bass. Low register, and most 4-note groups
/// follow the low-high-mid-high shape.
fn detect_alberti(notes: &[Note], feats: &WindowFeatures) -> Option<Classification> {
    if feats.first_staff != 2 && notes[0].pitch >= 60 {
        return None;
    }

    let pitches: Vec<i32> = notes.iter().map(|n| n.pitch as i32).collect();
    let groups = pitches.len() / 4;
    if groups == 0 {
        return None;
    }

    let matches = (0..groups)
        .filter(|&g| {
            let p = &pitches[g * 4..g * 4 + 4];
            p[0] < p[2] && p[2] < p[1] && (p[1] - p[3]).abs() <= 1
        })
        .count();

    let match_ratio = matches as f64 / groups as f64;
    if match_ratio >= 0.6 {
        Some(Classification::new(
            PatternType::Alberti,
            0.6 + 0.35 * match_ratio,
            PatternDetail::Alberti { match_ratio },
        ))
    } else {
        None
    }
}

/// Priority 3: ostinato. Some prefix of length 2..=8 repeats
/// contiguously for at least three total occurrences.
fn detect_ostinato(notes: &[Note]) -> Option<Classification> {
    let pitches: Vec<u8> = notes.iter().map(|n| n.pitch).collect();
    let n = pitches.len();
    let max_period = (n / 3).min(8);

    for period in 2..=max_period {
        let mut repeats = 1;
        let mut offset = period;
        while offset + period <= n
            && (0..period).all(|j| pitches[offset + j] == pitches[j])
        {
            repeats += 1;
            offset += period;
        }
        if repeats >= 3 {
            let confidence = (0.7 + 0.05 * repeats as f64).min(0.95);
            return Some(Classification::new(
                PatternType::Ostinato,
                confidence,
                PatternDetail::Ostinato { period, repeats },
            ));
        }
    }

    None
}

/// Priority 4: polyphony. Two or more voice tags whose beat sets
/// barely overlap (independent rhythms in one staff).
fn detect_polyphonic(notes: &[Note]) -> Option<Classification> {
    let mut voices: Vec<u8> = Vec::new();
    for note in notes {
        if !voices.contains(&note.voice) {
            voices.push(note.voice);
        }
    }
    if voices.len() < 2 {
        return None;
    }

    let beats_of = |voice: u8| -> std::collections::HashSet<(u32, i64)> {
        notes
            .iter()
            .filter(|n| n.voice == voice)
            .map(beat_key)
            .collect()
    };
    let first = beats_of(voices[0]);
    let second = beats_of(voices[1]);

    let denom = first.len().max(second.len());
    let overlap = if denom == 0 {
        0.0
    } else {
        first.intersection(&second).count() as f64 / denom as f64
    };

    if overlap < 0.4 {
        Some(Classification::new(
            PatternType::Polyphonic,
            0.8,
            PatternDetail::Polyphonic {
                voices: voices.len(),
            },
        ))
    } else {
        None
    }
}

/// Priority 5: chordal texture, by simultaneity. Names the chord when
/// the stacked pitch classes form a known triad or seventh.
fn detect_chordal(notes: &[Note], feats: &WindowFeatures) -> Option<Classification> {
    if feats.simultaneity_mean < 2.0 && feats.simultaneity_max < 3 {
        return None;
    }

    let pcs = unique_pitch_classes(notes);
    let chord = identify_chord(&pcs);

    Some(Classification::new(
        PatternType::Chordal,
        0.9,
        PatternDetail::Chordal {
            quality: chord.as_ref().map(|c| c.quality),
            root: chord.as_ref().map(|c| c.root),
            inversion: chord.as_ref().map(|c| c.inversion).unwrap_or(0),
            mean_simultaneity: feats.simultaneity_mean,
        },
    ))
}

/// Priority 6: scale. Overwhelmingly stepwise with a clear direction;
/// never fires on mixed-direction noodling.
fn detect_scale(notes: &[Note], feats: &WindowFeatures) -> Option<Classification> {
    if feats.stepwise_ratio < 0.8 {
        return None;
    }

    let direction = if feats.ascending_ratio > 0.75 {
        Direction::Ascending
    } else if feats.descending_ratio > 0.75 {
        Direction::Descending
    } else if feats.ascending_ratio > 0.5 && feats.descending_ratio > 0.3 {
        Direction::Bidirectional
    } else {
        return None;
    };

    let abs: Vec<i32> = intervals(notes).iter().map(|i| i.abs()).collect();
    let (scale_type, tonic) = identify_scale(&abs, notes);

    Some(Classification::new(
        PatternType::Scale,
        0.92,
        PatternDetail::Scale {
            direction,
            scale_type,
            tonic,
        },
    ))
}

/// Priority 7: arpeggio. Skip-dominated motion outlining a triad or
/// seventh chord.
fn detect_arpeggio(notes: &[Note], feats: &WindowFeatures) -> Option<Classification> {
    if feats.skip_ratio < 0.5 {
        return None;
    }

    let pcs = unique_pitch_classes(notes);
    let outlined = match pcs.len() {
        3 => identify_chord(&pcs).is_some(),
        4 => {
            let i1 = pcs[1] as i32 - pcs[0] as i32;
            let i2 = pcs[2] as i32 - pcs[1] as i32;
            (3..=4).contains(&i1) && (3..=4).contains(&i2)
        }
        _ => false,
    };
    if !outlined {
        return None;
    }

    let direction = if feats.ascending_ratio > feats.descending_ratio {
        Direction::Ascending
    } else if feats.descending_ratio > feats.ascending_ratio {
        Direction::Descending
    } else {
        Direction::Bidirectional
    };
    let chord = identify_chord(&pcs);

    Some(Classification::new(
        PatternType::Arpeggio,
        0.88,
        PatternDetail::Arpeggio {
            direction,
            quality: chord.as_ref().map(|c| c.quality),
            root: chord.as_ref().map(|c| c.root),
        },
    ))
}

/// Priority 8: repeated notes. Near-zero pitch entropy with either a
/// long run of one pitch or a strict two-pitch alternation.
fn detect_repeated(notes: &[Note], feats: &WindowFeatures) -> Option<Classification> {
    if feats.entropy >= 0.5 {
        return None;
    }

    let pitches: Vec<u8> = notes.iter().map(|n| n.pitch).collect();

    let mut longest_run = 1;
    let mut run = 1;
    for pair in pitches.windows(2) {
        if pair[0] == pair[1] {
            run += 1;
            longest_run = longest_run.max(run);
        } else {
            run = 1;
        }
    }

    if longest_run >= 3 {
        let confidence = (0.7 + 0.05 * longest_run as f64).min(0.95);
        return Some(Classification::new(
            PatternType::Repeated,
            confidence,
            PatternDetail::Repeated {
                repeat_kind: RepeatKind::Single,
                count: longest_run,
            },
        ));
    }

    let mut distinct: Vec<u8> = pitches.clone();
    distinct.sort_unstable();
    distinct.dedup();
    let alternating = distinct.len() == 2
        && pitches.windows(2).all(|pair| pair[0] != pair[1])
        && pitches.windows(3).all(|triple| triple[0] == triple[2]);
    if alternating {
        return Some(Classification::new(
            PatternType::Repeated,
            0.85,
            PatternDetail::Repeated {
                repeat_kind: RepeatKind::Alternating,
                count: pitches.len(),
            },
        ));
    }

    None
}

/// Priority 9: leaps. A wide interval somewhere and frequent
/// direction reversals.
fn detect_leap(notes: &[Note], feats: &WindowFeatures) -> Option<Classification> {
    let ivals = intervals(notes);
    let n_ivals = ivals.len();
    if feats.max_interval <= 4 || (feats.direction_changes as f64) <= 0.4 * n_ivals as f64 {
        return None;
    }

    let contour = if (feats.direction_changes as f64) > 0.5 * n_ivals as f64 {
        Contour::Jagged
    } else {
        let first_half: i32 = ivals[..n_ivals / 2].iter().sum();
        let second_half: i32 = ivals[n_ivals / 2..].iter().sum();
        if first_half > 0 && second_half < 0 {
            Contour::Arch
        } else if first_half < 0 && second_half > 0 {
            Contour::Valley
        } else {
            Contour::Linear
        }
    };

    Some(Classification::new(
        PatternType::Leap,
        0.8,
        PatternDetail::Leap { contour },
    ))
}

/// Priority 10: melodic. Slurred or rhythmically varied lines.
fn detect_melodic(feats: &WindowFeatures) -> Option<Classification> {
    if !feats.any_slur && feats.duration_variance <= 0.3 {
        return None;
    }

    let style = if feats.any_slur && feats.duration_mean > 1.0 {
        MelodicStyle::Cantabile
    } else if feats.duration_variance > 0.4 {
        MelodicStyle::Expressive
    } else if feats.any_slur {
        MelodicStyle::Lyrical
    } else {
        MelodicStyle::Neutral
    };

    Some(Classification::new(
        PatternType::Melodic,
        0.7,
        PatternDetail::Melodic { style },
    ))
}

// ============================================================================
// Chord and scale identification
// ============================================================================

/// A chord named from its pitch-class set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordId {
    /// Root pitch class (0-11)
    pub root: u8,
    pub quality: ChordQuality,
    /// Rotation of the sorted pitch-class set that exposed the root
    pub inversion: u8,
}

const TRIAD_SHAPES: [([i32; 2], ChordQuality); 4] = [
    ([4, 3], ChordQuality::Major),
    ([3, 4], ChordQuality::Minor),
    ([3, 3], ChordQuality::Diminished),
    ([4, 4], ChordQuality::Augmented),
];

const SEVENTH_SHAPES: [([i32; 3], ChordQuality); 3] = [
    ([4, 3, 3], ChordQuality::DominantSeventh),
    ([4, 3, 4], ChordQuality::MajorSeventh),
    ([3, 4, 3], ChordQuality::MinorSeventh),
];

/// Sorted, deduplicated pitch classes of a window
pub fn unique_pitch_classes(notes: &[Note]) -> Vec<u8> {
    let mut pcs: Vec<u8> = notes.iter().map(|n| pitch_class(n.pitch)).collect();
    pcs.sort_unstable();
    pcs.dedup();
    pcs
}

/// Try to name a triad (3 pitch classes) or seventh chord (4) from a
/// sorted pitch-class set, testing every rotation.
pub fn identify_chord(pcs: &[u8]) -> Option<ChordId> {
    match pcs.len() {
        3 => {
            for k in 0..3 {
                let ivs = rotation_intervals(pcs, k);
                for (shape, quality) in TRIAD_SHAPES {
                    if ivs == shape {
                        return Some(ChordId {
                            root: pcs[k],
                            quality,
                            inversion: k as u8,
                        });
                    }
                }
            }
            None
        }
        4 => {
            for k in 0..4 {
                let ivs = rotation_intervals(pcs, k);
                for (shape, quality) in SEVENTH_SHAPES {
                    if ivs == shape {
                        return Some(ChordId {
                            root: pcs[k],
                            quality,
                            inversion: k as u8,
                        });
                    }
                }
            }
            None
        }
        _ => None,
    }
}

/// Consecutive pitch-class intervals of `pcs` rotated to start at `k`
fn rotation_intervals<const N: usize>(pcs: &[u8], k: usize) -> [i32; N] {
    let mut out = [0i32; N];
    let len = pcs.len();
    for (j, slot) in out.iter_mut().enumerate() {
        let a = pcs[(k + j) % len] as i32;
        let b = pcs[(k + j + 1) % len] as i32;
        *slot = (b - a).rem_euclid(12);
    }
    out
}

const MAJOR_STEPS: [i32; 7] = [2, 2, 1, 2, 2, 2, 1];
const MINOR_STEPS: [i32; 7] = [2, 1, 2, 2, 1, 2, 2];

/// Name the scale family of a stepwise window from its absolute
/// interval vector. Descending runs are matched against the reversed
/// vector so the same step patterns apply.
fn identify_scale(abs: &[i32], notes: &[Note]) -> (ScaleType, Option<u8>) {
    if !abs.is_empty() && abs.iter().all(|&i| i == 1) {
        return (ScaleType::Chromatic, None);
    }

    if let Some(k) = find_pattern(abs, &MAJOR_STEPS) {
        return (ScaleType::Major, Some(pitch_class(notes[k].pitch)));
    }
    let reversed: Vec<i32> = abs.iter().rev().copied().collect();
    if let Some(k) = find_pattern(&reversed, &MAJOR_STEPS) {
        // the ascending pattern read backwards starts at the low end
        return (ScaleType::Major, Some(pitch_class(notes[abs.len() - k].pitch)));
    }

    if let Some(k) = find_pattern(abs, &MINOR_STEPS) {
        return (ScaleType::Minor, Some(pitch_class(notes[k].pitch)));
    }
    if let Some(k) = find_pattern(&reversed, &MINOR_STEPS) {
        return (ScaleType::Minor, Some(pitch_class(notes[abs.len() - k].pitch)));
    }

    if !abs.is_empty() && abs.iter().all(|&i| i == 2 || i == 3) {
        return (ScaleType::Pentatonic, None);
    }

    (ScaleType::Modal, None)
}

/// First position where `needle` occurs as a contiguous slice of
/// `haystack`
fn find_pattern(haystack: &[i32], needle: &[i32]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&k| &haystack[k..k + needle.len()] == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::features::extract;

    fn notes_from(pitches: &[u8]) -> Vec<Note> {
        pitches
            .iter()
            .enumerate()
            .map(|(i, &p)| Note::new(p, 1.0).with_position(1, i as f64))
            .collect()
    }

    fn classify(notes: &[Note]) -> Classification {
        let feats = extract(notes);
        classify_window(notes, &feats)
    }

    #[test]
    fn test_ascending_major_scale() {
        let c = classify(&notes_from(&[60, 62, 64, 65, 67, 69, 71, 72]));
        assert_eq!(c.pattern_type, PatternType::Scale);
        assert_eq!(c.confidence, 0.92);
        match c.detail {
            PatternDetail::Scale {
                direction,
                scale_type,
                tonic,
            } => {
                assert_eq!(direction, Direction::Ascending);
                assert_eq!(scale_type, ScaleType::Major);
                assert_eq!(tonic, Some(0));
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_descending_major_scale() {
        let c = classify(&notes_from(&[72, 71, 69, 67, 65, 64, 62, 60]));
        assert_eq!(c.pattern_type, PatternType::Scale);
        match c.detail {
            PatternDetail::Scale {
                direction,
                scale_type,
                ..
            } => {
                assert_eq!(direction, Direction::Descending);
                assert_eq!(scale_type, ScaleType::Major);
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_chromatic_scale() {
        let c = classify(&notes_from(&[60, 61, 62, 63, 64, 65, 66, 67]));
        assert_eq!(c.pattern_type, PatternType::Scale);
        assert!(matches!(
            c.detail,
            PatternDetail::Scale {
                scale_type: ScaleType::Chromatic,
                ..
            }
        ));
    }

    #[test]
    fn test_broken_triad_arpeggio() {
        let c = classify(&notes_from(&[60, 64, 67, 72, 76, 79, 84]));
        assert_eq!(c.pattern_type, PatternType::Arpeggio);
        match c.detail {
            PatternDetail::Arpeggio {
                direction,
                quality,
                root,
            } => {
                assert_eq!(direction, Direction::Ascending);
                assert_eq!(quality, Some(ChordQuality::Major));
                assert_eq!(root, Some(0));
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_repeated_single_pitch() {
        let c = classify(&notes_from(&[60, 60, 60, 60, 60]));
        assert_eq!(c.pattern_type, PatternType::Repeated);
        assert!((c.confidence - 0.95).abs() < 1e-9);
        assert_eq!(
            c.detail,
            PatternDetail::Repeated {
                repeat_kind: RepeatKind::Single,
                count: 5,
            }
        );
    }

    #[test]
    fn test_alberti_bass_in_left_hand() {
        let notes: Vec<Note> = [48u8, 55, 52, 55, 48, 55, 52, 55, 48, 55, 52, 55]
            .iter()
            .enumerate()
            .map(|(i, &p)| Note::new(p, 0.5).with_staff(2).with_position(1, i as f64 * 0.5))
            .collect();
        let feats = extract(&notes);
        let c = classify_window(&notes, &feats);
        assert_eq!(c.pattern_type, PatternType::Alberti);
        assert!(matches!(c.detail, PatternDetail::Alberti { match_ratio } if match_ratio == 1.0));
    }

    #[test]
    fn test_ostinato_prefix_repeats() {
        // three statements of a 3-note cell, right hand register
        let c = classify(&notes_from(&[72, 76, 74, 72, 76, 74, 72, 76, 74]));
        assert_eq!(c.pattern_type, PatternType::Ostinato);
        assert_eq!(
            c.detail,
            PatternDetail::Ostinato {
                period: 3,
                repeats: 3,
            }
        );
        assert!((c.confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_polyphonic_independent_voices() {
        let mut notes = Vec::new();
        // voice 1 on the beat, voice 2 off the beat: disjoint beat sets
        let melody = [72u8, 74, 76, 77];
        for (i, &p) in melody.iter().enumerate() {
            notes.push(Note::new(p, 1.0).with_voice(1).with_position(1, i as f64));
            notes.push(
                Note::new(60, 0.5).with_voice(2).with_position(1, i as f64 + 0.5),
            );
        }
        let c = classify(&notes);
        assert_eq!(c.pattern_type, PatternType::Polyphonic);
        assert_eq!(c.detail, PatternDetail::Polyphonic { voices: 2 });
    }

    #[test]
    fn test_chordal_stacked_notes() {
        let mut notes = Vec::new();
        for beat in 0..2 {
            for p in [60u8, 64, 67] {
                notes.push(Note::new(p, 1.0).with_chord().with_position(1, beat as f64));
            }
        }
        let c = classify(&notes);
        assert_eq!(c.pattern_type, PatternType::Chordal);
        match c.detail {
            PatternDetail::Chordal { quality, root, .. } => {
                assert_eq!(quality, Some(ChordQuality::Major));
                assert_eq!(root, Some(0));
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_trill_flag_wins_over_everything() {
        let mut notes = notes_from(&[60, 62]);
        notes[0].has_trill = true;
        let c = classify(&notes);
        assert_eq!(c.pattern_type, PatternType::Ornamented);
        assert_eq!(c.confidence, 1.0);
        assert_eq!(
            c.detail,
            PatternDetail::Ornamented {
                ornament: OrnamentType::Trill,
            }
        );
    }

    #[test]
    fn test_unmarked_trill_heuristic() {
        let notes: Vec<Note> = (0..8)
            .map(|i| {
                Note::new(if i % 2 == 0 { 72 } else { 74 }, 0.0625)
                    .with_position(1, i as f64 * 0.0625)
            })
            .collect();
        let c = classify(&notes);
        assert_eq!(c.pattern_type, PatternType::Ornamented);
        assert_eq!(c.confidence, 0.75);
    }

    #[test]
    fn test_leap_with_reversals() {
        let c = classify(&notes_from(&[60, 72, 62, 74, 60, 71]));
        assert_eq!(c.pattern_type, PatternType::Leap);
        assert!(matches!(c.detail, PatternDetail::Leap { contour: Contour::Jagged }));
    }

    #[test]
    fn test_melodic_slurred_line() {
        // skips outlining no chord, no wide leap: only the slur applies
        let mut notes = notes_from(&[60, 63, 66, 69, 72, 74]);
        for n in &mut notes {
            n.has_slur = true;
            n.duration = 2.0;
        }
        let c = classify(&notes);
        assert_eq!(c.pattern_type, PatternType::Melodic);
        assert!(matches!(
            c.detail,
            PatternDetail::Melodic {
                style: MelodicStyle::Cantabile,
            }
        ));
    }

    #[test]
    fn test_unknown_fallback() {
        let c = classify(&notes_from(&[60, 63, 66, 62]));
        assert_eq!(c.pattern_type, PatternType::Unknown);
        assert_eq!(c.confidence, 0.5);
    }

    #[test]
    fn test_identify_chord_rotations() {
        // C major in "first inversion" pitch-class order
        assert_eq!(
            identify_chord(&[0, 4, 7]),
            Some(ChordId {
                root: 0,
                quality: ChordQuality::Major,
                inversion: 0,
            })
        );
        // A minor: A C E -> sorted pcs [0, 4, 9], root at rotation 2
        let a_minor = identify_chord(&[0, 4, 9]).unwrap();
        assert_eq!(a_minor.root, 9);
        assert_eq!(a_minor.quality, ChordQuality::Minor);
        // G7: G B D F -> sorted pcs [2, 5, 7, 11]
        let g7 = identify_chord(&[2, 5, 7, 11]).unwrap();
        assert_eq!(g7.root, 7);
        assert_eq!(g7.quality, ChordQuality::DominantSeventh);
        // not a chord
        assert_eq!(identify_chord(&[0, 1, 2]), None);
    }
}
