//! Frequency-based keyword extraction.
//!
//! Tokens are lower-cased runs of letters/digits. Tokens of three characters
//! or fewer are treated as stop words and dropped.

use crate::model::analysis::KeywordResult;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static TOKEN_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid token separator regex"));

const MIN_KEYWORD_CHARS: usize = 4;
const RELEVANCE_PER_OCCURRENCE: u32 = 10;
const MAX_RELEVANCE: u32 = 100;
const SUGGESTION_SUFFIXES: [&str; 3] = ["s", "ing", "ed"];

/// Returns at most `top_n` keywords ranked by frequency.
///
/// Ties keep first-occurrence order. Returns an empty list for blank text or
/// `top_n == 0`.
pub fn extract(text: &str, top_n: usize) -> Vec<KeywordResult> {
    if top_n == 0 {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    let mut counts: Vec<(&str, u32)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for token in TOKEN_SEPARATOR_RE.split(&lowered) {
        if token.chars().count() < MIN_KEYWORD_CHARS {
            continue;
        }
        match positions.get(token).copied() {
            Some(index) => counts[index].1 += 1,
            None => {
                positions.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // Stable sort keeps first-occurrence order among equal counts.
    counts.sort_by(|left, right| right.1.cmp(&left.1));
    counts.truncate(top_n);

    counts
        .into_iter()
        .map(|(token, frequency)| KeywordResult {
            keyword: token.to_string(),
            relevance: relevance_for(frequency),
            frequency,
            suggestions: morphological_variants(token),
        })
        .collect()
}

fn relevance_for(frequency: u32) -> u8 {
    let relevance = frequency
        .saturating_mul(RELEVANCE_PER_OCCURRENCE)
        .min(MAX_RELEVANCE);
    u8::try_from(relevance).unwrap_or(u8::MAX)
}

fn morphological_variants(token: &str) -> Vec<String> {
    SUGGESTION_SUFFIXES
        .iter()
        .map(|suffix| format!("{token}{suffix}"))
        .filter(|variant| variant != token)
        .collect()
}
