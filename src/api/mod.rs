//! Fingering Analysis WASM API
//!
//! The JavaScript-facing surface of the analysis module:
//!
//! - `helpers`: serialization, validation, error conversion, and
//!   console logging shared by all entry points
//! - `analyze`: the analysis entry points themselves
//!
//! The API holds no state between calls; every invocation passes its
//! full input and receives a freshly built result.

pub mod analyze;
pub mod helpers;

pub use analyze::{analyze_fingering, difficulty_profile, recognize_patterns};
