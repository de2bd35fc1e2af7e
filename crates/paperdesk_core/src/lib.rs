//! Academic content engine for PaperDesk.
//! This crate is the single source of truth for citation, outline and
//! text-analysis invariants; UI panels only call into it.

pub mod analysis;
pub mod citation;
pub mod config;
pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod outline;
pub mod provider;
pub mod store;

pub use citation::{format_apa, format_mla, CitationError, CitationManager, CitationStyle};
pub use config::EngineConfig;
pub use engine::{ContentEngine, EngineError, EngineResult, ValidationError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::analysis::{CoherenceRating, CoherenceResult, DocumentAnalysis, KeywordResult};
pub use model::citation::{Citation, CitationId, CitationValidationError, NewCitation};
pub use model::outline::{
    OutlineId, OutlineSection, OutlineValidationError, PaperOutline, SectionId,
};
pub use outline::{OutlineError, OutlineGenerator, OUTLINE_SECTION_TITLES};
pub use provider::{
    AnalysisProvider, HeuristicProvider, ProviderError, ProviderKind, ProviderResult,
};
pub use store::{
    CollectionStore, MemoryCollectionStore, SqliteCollectionStore, StorageError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
