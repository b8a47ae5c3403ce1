//! JavaScript-facing analysis entry points
//!
//! Each function deserializes its JS inputs, runs the pure analysis
//! core, and serializes the result back. No state survives a call.

use wasm_bindgen::prelude::*;

use crate::error::AnalysisError;
use crate::fingering::DifficultyProfile;
use crate::models::{Difficulty, Note};
use crate::pipeline;

use super::helpers::{deserialize, serialize, validate_notes, validation_error};
use crate::wasm_log;

fn parse_difficulty(difficulty: &str) -> Result<Difficulty, JsValue> {
    difficulty
        .parse::<Difficulty>()
        .map_err(|_| validation_error(AnalysisError::InvalidDifficulty(difficulty.to_string())))
}

/// Assign a finger to every pitched note of a two-hand score.
///
/// # Parameters
/// - `notes_js`: JavaScript array of Note objects (camelCase fields)
/// - `difficulty`: "beginner", "intermediate", or "advanced"
///
/// # Returns
/// An object with `solution` (fingers, totalCost, reasons) and
/// `segments` (both hands' labeled patterns).
#[wasm_bindgen(js_name = analyzeFingering)]
pub fn analyze_fingering(notes_js: JsValue, difficulty: &str) -> Result<JsValue, JsValue> {
    let difficulty = parse_difficulty(difficulty)?;
    let notes: Vec<Note> = deserialize(notes_js, "Failed to parse notes")?;
    let notes = validate_notes(notes).map_err(validation_error)?;

    wasm_log!("analyzeFingering: {} notes, {}", notes.len(), difficulty);
    let result = pipeline::analyze(&notes, difficulty);

    serialize(&result, "Failed to serialize analysis result")
}

/// Segment a note stream into labeled musical patterns without
/// planning any fingering. Notes from both staves are analyzed
/// per hand, as in the full pipeline.
#[wasm_bindgen(js_name = recognizePatterns)]
pub fn recognize_patterns(notes_js: JsValue) -> Result<JsValue, JsValue> {
    let notes: Vec<Note> = deserialize(notes_js, "Failed to parse notes")?;
    let notes = validate_notes(notes).map_err(validation_error)?;

    let segments = pipeline::recognize(&notes);
    serialize(&segments, "Failed to serialize segments")
}

/// Inspect the cost-model parameters for a difficulty level
#[wasm_bindgen(js_name = difficultyProfile)]
pub fn difficulty_profile(difficulty: &str) -> Result<JsValue, JsValue> {
    let difficulty = parse_difficulty(difficulty)?;
    let profile = DifficultyProfile::for_difficulty(difficulty);
    serialize(&profile, "Failed to serialize difficulty profile")
}
