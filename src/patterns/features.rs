//! Numeric feature extraction for classification windows
//!
//! Every window is reduced to one `WindowFeatures` record before the
//! decision tree runs. All ratios over an empty denominator are 0,
//! and the entropy of a single-pitch window is 0.

use std::collections::HashMap;

use crate::models::Note;

/// Feature vector extracted from one classification window
#[derive(Debug, Clone, Default)]
pub struct WindowFeatures {
    /// Highest minus lowest pitch, in semitones
    pub pitch_range: u8,
    /// Base-2 Shannon entropy of the pitch distribution
    pub entropy: f64,
    /// Fraction of intervals moving up
    pub ascending_ratio: f64,
    /// Fraction of intervals moving down
    pub descending_ratio: f64,
    /// Largest absolute interval
    pub max_interval: i32,
    /// Mean absolute interval
    pub mean_interval: f64,
    /// Population variance of absolute intervals
    pub interval_variance: f64,
    /// Fraction of intervals that are steps (|I| <= 2)
    pub stepwise_ratio: f64,
    /// Fraction of intervals that are skips (|I| > 2)
    pub skip_ratio: f64,
    /// Fraction of intervals that are wide leaps (|I| > 4)
    pub leap_ratio: f64,
    /// Count of sign flips between consecutive nonzero intervals
    pub direction_changes: usize,
    /// Mean notes per distinct beat position
    pub simultaneity_mean: f64,
    /// Most notes sharing one beat position
    pub simultaneity_max: usize,
    pub duration_mean: f64,
    pub duration_variance: f64,
    pub any_slur: bool,
    pub any_ornament: bool,
    pub any_grace: bool,
    /// Staff tag of the first note in the window
    pub first_staff: u8,
}

/// Beat-position key: measure number plus the beat rounded to two
/// decimals. Notes sharing a key sound together.
pub fn beat_key(note: &Note) -> (u32, i64) {
    (note.measure_number, (note.beat * 100.0).round() as i64)
}

/// Signed intervals between consecutive window pitches
pub fn intervals(notes: &[Note]) -> Vec<i32> {
    notes
        .windows(2)
        .map(|pair| pair[1].pitch as i32 - pair[0].pitch as i32)
        .collect()
}

/// Extract the full feature vector for one window
pub fn extract(notes: &[Note]) -> WindowFeatures {
    if notes.is_empty() {
        return WindowFeatures::default();
    }

    let pitches: Vec<u8> = notes.iter().map(|n| n.pitch).collect();
    let ivals = intervals(notes);
    let n_ivals = ivals.len();

    let pitch_min = *pitches.iter().min().unwrap();
    let pitch_max = *pitches.iter().max().unwrap();

    let ratio = |count: usize| {
        if n_ivals == 0 {
            0.0
        } else {
            count as f64 / n_ivals as f64
        }
    };

    let ascending = ivals.iter().filter(|&&i| i > 0).count();
    let descending = ivals.iter().filter(|&&i| i < 0).count();
    let stepwise = ivals.iter().filter(|&&i| i.abs() <= 2).count();
    let skips = ivals.iter().filter(|&&i| i.abs() > 2).count();
    let leaps = ivals.iter().filter(|&&i| i.abs() > 4).count();

    let abs_mean = if n_ivals == 0 {
        0.0
    } else {
        ivals.iter().map(|i| i.abs() as f64).sum::<f64>() / n_ivals as f64
    };
    let interval_variance = if n_ivals == 0 {
        0.0
    } else {
        ivals
            .iter()
            .map(|i| {
                let d = i.abs() as f64 - abs_mean;
                d * d
            })
            .sum::<f64>()
            / n_ivals as f64
    };

    let direction_changes = ivals
        .windows(2)
        .filter(|pair| pair[0] != 0 && pair[1] != 0 && pair[0].signum() != pair[1].signum())
        .count();

    // Simultaneity: group window notes by rounded beat position
    let mut groups: HashMap<(u32, i64), usize> = HashMap::new();
    for note in notes {
        *groups.entry(beat_key(note)).or_insert(0) += 1;
    }
    let simultaneity_max = groups.values().copied().max().unwrap_or(0);
    let simultaneity_mean = if groups.is_empty() {
        0.0
    } else {
        notes.len() as f64 / groups.len() as f64
    };

    let duration_mean = notes.iter().map(|n| n.duration).sum::<f64>() / notes.len() as f64;
    let duration_variance = notes
        .iter()
        .map(|n| {
            let d = n.duration - duration_mean;
            d * d
        })
        .sum::<f64>()
        / notes.len() as f64;

    WindowFeatures {
        pitch_range: pitch_max - pitch_min,
        entropy: pitch_entropy(&pitches),
        ascending_ratio: ratio(ascending),
        descending_ratio: ratio(descending),
        max_interval: ivals.iter().map(|i| i.abs()).max().unwrap_or(0),
        mean_interval: abs_mean,
        interval_variance,
        stepwise_ratio: ratio(stepwise),
        skip_ratio: ratio(skips),
        leap_ratio: ratio(leaps),
        direction_changes,
        simultaneity_mean,
        simultaneity_max,
        duration_mean,
        duration_variance,
        any_slur: notes.iter().any(|n| n.has_slur || n.slur_start || n.slur_stop),
        any_ornament: notes.iter().any(|n| n.has_ornament()),
        any_grace: notes.iter().any(|n| n.is_grace),
        first_staff: notes[0].staff,
    }
}

/// Base-2 Shannon entropy of the pitch multiset
fn pitch_entropy(pitches: &[u8]) -> f64 {
    if pitches.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<u8, usize> = HashMap::new();
    for &p in pitches {
        *counts.entry(p).or_insert(0) += 1;
    }

    let n = pitches.len() as f64;
    counts
        .values()
        .map(|&c| {
            let p = c as f64 / n;
            -p * p.log2()
        })
        .sum()
}
