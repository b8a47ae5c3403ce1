//! Shared helpers for WASM API operations
//!
//! Common patterns for serialization, deserialization, input
//! validation, and console logging used by all API entry points.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::AnalysisError;
use crate::models::Note;

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

pub fn log_info(msg: &str) {
    info(&format!("[WASM] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[WASM] {}", msg));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        js_sys::Error::new(&msg).into()
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        js_sys::Error::new(&msg).into()
    })
}

/// Convert a validation error to a JavaScript Error
pub fn validation_error(err: AnalysisError) -> JsValue {
    let msg = err.to_string();
    log_error(&msg);
    js_sys::Error::new(&msg).into()
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Validate pitches and drop rests before the stream enters the core
pub fn validate_notes(notes: Vec<Note>) -> Result<Vec<Note>, AnalysisError> {
    for (index, note) in notes.iter().enumerate() {
        if note.pitch > 127 {
            return Err(AnalysisError::PitchOutOfRange {
                index,
                pitch: note.pitch,
            });
        }
    }

    let before = notes.len();
    let pitched: Vec<Note> = notes.into_iter().filter(|n| !n.is_rest).collect();
    if pitched.len() < before {
        log::debug!("filtered {} rests from input", before - pitched.len());
    }
    Ok(pitched)
}
