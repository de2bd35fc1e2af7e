//! Transient analysis results. Computed per request, never persisted.

use serde::{Deserialize, Serialize};

/// One ranked term from keyword extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keyword: String,
    /// 0..=100, linear in `frequency` and capped.
    pub relevance: u8,
    /// Always >= 1.
    pub frequency: u32,
    pub suggestions: Vec<String>,
}

/// Coherence score for a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoherenceResult {
    /// 0..=100.
    pub score: u8,
    pub suggestions: Vec<String>,
}

/// Qualitative band a caller may show next to a coherence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceRating {
    Strong,
    Moderate,
    Weak,
}

impl CoherenceResult {
    pub fn rating(&self) -> CoherenceRating {
        CoherenceRating::from_score(self.score)
    }
}

impl CoherenceRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Strong,
            60..=79 => Self::Moderate,
            _ => Self::Weak,
        }
    }
}

/// Whole-document writing-assistant result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub suggestions: Vec<String>,
    /// 0..=100.
    pub coherence: u8,
    pub keywords: Vec<KeywordResult>,
}

#[cfg(test)]
mod tests {
    use super::CoherenceRating;

    #[test]
    fn rating_bands_split_at_60_and_80() {
        assert_eq!(CoherenceRating::from_score(100), CoherenceRating::Strong);
        assert_eq!(CoherenceRating::from_score(80), CoherenceRating::Strong);
        assert_eq!(CoherenceRating::from_score(79), CoherenceRating::Moderate);
        assert_eq!(CoherenceRating::from_score(60), CoherenceRating::Moderate);
        assert_eq!(CoherenceRating::from_score(59), CoherenceRating::Weak);
    }
}
