//! Heuristic coherence scoring.
//!
//! Paragraph score grows with sentence count; document score is a fixed
//! baseline until a model-backed provider replaces it.

use super::keywords;
use crate::model::analysis::{CoherenceResult, DocumentAnalysis};
use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_TERMINATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence terminator regex"));

const BASE_PARAGRAPH_SCORE: usize = 50;
const SCORE_PER_SENTENCE: usize = 5;
const MAX_SCORE: usize = 100;

/// Coherence reported for whole documents by the heuristic provider.
pub const DOCUMENT_COHERENCE_SCORE: u8 = 75;

const PARAGRAPH_SUGGESTIONS: [&str; 3] = [
    "Use transition words to connect each sentence to the one before it.",
    "Keep every sentence focused on the paragraph's main idea.",
    "Close the paragraph with a sentence that links to the next point.",
];

const DOCUMENT_SUGGESTIONS: [&str; 3] = [
    "Consider adding more transitions between paragraphs.",
    "State the central argument clearly in the introduction.",
    "Support key claims with evidence from your citations.",
];

/// Scores a paragraph by counting its non-empty sentences.
pub fn analyze_paragraph(text: &str) -> CoherenceResult {
    let sentences = count_sentences(text);
    let score = BASE_PARAGRAPH_SCORE
        .saturating_add(sentences.saturating_mul(SCORE_PER_SENTENCE))
        .min(MAX_SCORE);

    CoherenceResult {
        score: u8::try_from(score).unwrap_or(u8::MAX),
        suggestions: PARAGRAPH_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Analyzes a whole document: fixed advice, baseline coherence, and the top
/// `keyword_limit` keywords.
pub fn analyze_document(text: &str, keyword_limit: usize) -> DocumentAnalysis {
    DocumentAnalysis {
        suggestions: DOCUMENT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        coherence: DOCUMENT_COHERENCE_SCORE,
        keywords: keywords::extract(text, keyword_limit),
    }
}

fn count_sentences(text: &str) -> usize {
    SENTENCE_TERMINATOR_RE
        .split(text)
        .filter(|fragment| !fragment.trim().is_empty())
        .count()
}
