//! Heuristic text analysis: keyword ranking and coherence scoring.
//!
//! # Invariants
//! - Every function here is pure: same input, same output, no I/O.

pub mod coherence;
pub mod keywords;

pub use coherence::{analyze_document, analyze_paragraph, DOCUMENT_COHERENCE_SCORE};
pub use keywords::extract;
