//! Engine configuration supplied by the hosting UI layer.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CITATIONS_COLLECTION: &str = "citations";
pub const DEFAULT_OUTLINES_COLLECTION: &str = "paper_outlines";
pub const DEFAULT_KEYWORD_LIMIT: usize = 8;
pub const DEFAULT_DOCUMENT_KEYWORD_LIMIT: usize = 5;
pub const DEFAULT_MIN_ANALYSIS_CHARS: usize = 1;

/// Collection names and analysis limits.
///
/// Collection names are storage keys and must stay stable across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub citations_collection: String,
    pub outlines_collection: String,
    /// Result size for standalone keyword extraction.
    pub keyword_limit: usize,
    /// Result size for keywords inside whole-document analysis.
    pub document_keyword_limit: usize,
    /// Minimum trimmed character count accepted by analysis calls.
    pub min_analysis_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            citations_collection: DEFAULT_CITATIONS_COLLECTION.to_string(),
            outlines_collection: DEFAULT_OUTLINES_COLLECTION.to_string(),
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            document_keyword_limit: DEFAULT_DOCUMENT_KEYWORD_LIMIT,
            min_analysis_chars: DEFAULT_MIN_ANALYSIS_CHARS,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{"keyword_limit": 12}"#).unwrap();
        assert_eq!(config.keyword_limit, 12);
        assert_eq!(config.document_keyword_limit, 5);
        assert_eq!(config.citations_collection, "citations");
        assert_eq!(config.outlines_collection, "paper_outlines");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EngineConfig::from_json("{keyword_limit").is_err());
    }
}
