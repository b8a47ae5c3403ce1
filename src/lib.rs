//! Piano Fingering Analysis WASM Module
//!
//! Analyzes a parsed piano score and assigns a finger (1 = thumb
//! through 5 = pinky) to every pitched note, separately per hand.
//! The core is a pure two-stage pipeline: a pattern recognizer that
//! segments each hand's note stream into labeled musical patterns,
//! and a fingering planner that solves a shortest-path optimization
//! whose costs depend on the pattern context and a difficulty
//! profile.

pub mod api;
pub mod error;
pub mod fingering;
pub mod models;
pub mod patterns;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use error::AnalysisError;
pub use fingering::{DifficultyProfile, FingeringPlanner};
pub use models::{
    AnalysisResult, Difficulty, FingeringSolution, Hand, Note, PatternDetail, PatternSegment,
    PatternType,
};
pub use patterns::PatternRecognizer;
pub use pipeline::analyze;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Fingering analysis WASM module initialized");
}
