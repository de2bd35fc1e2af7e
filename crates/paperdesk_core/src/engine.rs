//! Content engine facade.
//!
//! # Responsibility
//! - Compose citation management, outline generation and text analysis into
//!   the single API surface consumed by UI panels.
//! - Own one store handle shared by both persisted collections.
//!
//! # Invariants
//! - Input validation runs before any mutation or provider call.
//! - Mutations update memory, then persist, then return.
//! - `Storage` errors pass through unchanged; memory may already hold the
//!   change that failed to persist.

use crate::analysis;
use crate::citation::{CitationError, CitationManager, CitationStyle};
use crate::config::EngineConfig;
use crate::model::analysis::{CoherenceResult, DocumentAnalysis, KeywordResult};
use crate::model::citation::{Citation, CitationId, CitationValidationError, NewCitation};
use crate::model::outline::{OutlineId, OutlineValidationError, PaperOutline};
use crate::outline::{OutlineError, OutlineGenerator};
use crate::provider::{AnalysisProvider, HeuristicProvider, ProviderError, ProviderKind};
use crate::store::{CollectionStore, StorageError};
use log::info;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

const MAX_SCORE: u8 = 100;

pub type EngineResult<T> = Result<T, EngineError>;

/// Bad caller input, rejected before anything changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Citation(CitationValidationError),
    Outline(OutlineValidationError),
    TextTooShort { min_chars: usize, actual_chars: usize },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Citation(err) => write!(f, "{err}"),
            Self::Outline(err) => write!(f, "{err}"),
            Self::TextTooShort {
                min_chars,
                actual_chars,
            } => write!(
                f,
                "text too short for analysis: {actual_chars} chars, need at least {min_chars}"
            ),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Citation(err) => Some(err),
            Self::Outline(err) => Some(err),
            Self::TextTooShort { .. } => None,
        }
    }
}

#[derive(Debug)]
pub enum EngineError {
    Validation(ValidationError),
    Storage(StorageError),
    Provider(ProviderError),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Provider(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Provider(err) => Some(err),
        }
    }
}

impl From<ValidationError> for EngineError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for EngineError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<ProviderError> for EngineError {
    fn from(value: ProviderError) -> Self {
        Self::Provider(value)
    }
}

impl From<CitationError> for EngineError {
    fn from(value: CitationError) -> Self {
        match value {
            CitationError::Validation(err) => Self::Validation(ValidationError::Citation(err)),
            CitationError::Storage(err) => Self::Storage(err),
        }
    }
}

impl From<OutlineError> for EngineError {
    fn from(value: OutlineError) -> Self {
        match value {
            OutlineError::Validation(err) => Self::Validation(ValidationError::Outline(err)),
            OutlineError::Provider(err) => Self::Provider(err),
            OutlineError::Storage(err) => Self::Storage(err),
        }
    }
}

/// Process-scoped engine context. Pass it explicitly to UI consumers.
pub struct ContentEngine<S: CollectionStore> {
    config: EngineConfig,
    citations: CitationManager<Rc<S>>,
    outlines: OutlineGenerator<Rc<S>>,
    provider: Box<dyn AnalysisProvider>,
}

impl<S: CollectionStore> ContentEngine<S> {
    /// Opens the engine with the heuristic provider.
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self::with_provider(store, config, Box::new(HeuristicProvider))
    }

    /// Opens the engine and loads both backing collections.
    pub fn with_provider(
        store: S,
        config: EngineConfig,
        provider: Box<dyn AnalysisProvider>,
    ) -> Self {
        let store = Rc::new(store);
        let citations = CitationManager::load(Rc::clone(&store), &config.citations_collection);
        let outlines = OutlineGenerator::load(store, &config.outlines_collection);
        info!(
            "event=engine_open module=engine status=ok provider={} citations={} outlines={}",
            provider.kind().as_str(),
            citations.list().len(),
            outlines.list().len()
        );

        Self {
            config,
            citations,
            outlines,
            provider,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    pub fn add_citation(&mut self, draft: NewCitation) -> EngineResult<Citation> {
        Ok(self.citations.add(draft)?)
    }

    /// Whole-record resubmit. `Ok(false)` when the id is unknown.
    pub fn update_citation(&mut self, citation: Citation) -> EngineResult<bool> {
        Ok(self.citations.update(citation)?)
    }

    /// `Ok(false)` is a no-op: nothing matched and nothing was written.
    pub fn delete_citation(&mut self, id: CitationId) -> EngineResult<bool> {
        Ok(self.citations.delete(id)?)
    }

    pub fn get_citation(&self, id: CitationId) -> Option<Citation> {
        self.citations.get(id)
    }

    pub fn list_citations(&self) -> Vec<Citation> {
        self.citations.list()
    }

    pub fn find_citations<K: AsRef<str>>(&self, keywords: &[K]) -> Vec<Citation> {
        self.citations.find_by_keyword(keywords)
    }

    pub fn format_citation(&self, citation: &Citation, style: CitationStyle) -> String {
        style.format(citation)
    }

    pub fn generate_outline(&mut self, topic: &str, description: &str) -> EngineResult<PaperOutline> {
        Ok(self
            .outlines
            .generate(self.provider.as_ref(), topic, description)?)
    }

    pub fn list_outlines(&self) -> Vec<PaperOutline> {
        self.outlines.list()
    }

    pub fn get_outline(&self, id: OutlineId) -> Option<PaperOutline> {
        self.outlines.get(id)
    }

    /// Whole-outline resubmit after editing. `Ok(false)` when unknown.
    pub fn update_outline(&mut self, outline: PaperOutline) -> EngineResult<bool> {
        Ok(self.outlines.update(outline)?)
    }

    pub fn delete_outline(&mut self, id: OutlineId) -> EngineResult<bool> {
        Ok(self.outlines.delete(id)?)
    }

    /// Standalone keyword tool: top `keyword_limit` keywords.
    pub fn extract_keywords(&self, text: &str) -> EngineResult<Vec<KeywordResult>> {
        self.ensure_analyzable(text)?;
        Ok(analysis::extract(text, self.config.keyword_limit))
    }

    /// Writing assistant: whole-document analysis through the provider.
    pub fn analyze_document(&self, text: &str) -> EngineResult<DocumentAnalysis> {
        self.ensure_analyzable(text)?;
        let analysis = self
            .provider
            .analyze_text(text, self.config.document_keyword_limit)?;
        if analysis.coherence > MAX_SCORE {
            return Err(ProviderError::InvalidResponse(format!(
                "coherence {} is outside 0..=100",
                analysis.coherence
            ))
            .into());
        }
        check_keywords(&analysis.keywords, self.config.document_keyword_limit)?;
        Ok(analysis)
    }

    pub fn analyze_paragraph(&self, text: &str) -> EngineResult<CoherenceResult> {
        self.ensure_analyzable(text)?;
        let result = self.provider.analyze_paragraph(text)?;
        if result.score > MAX_SCORE {
            return Err(ProviderError::InvalidResponse(format!(
                "paragraph score {} is outside 0..=100",
                result.score
            ))
            .into());
        }
        Ok(result)
    }

    fn ensure_analyzable(&self, text: &str) -> Result<(), ValidationError> {
        let actual_chars = text.trim().chars().count();
        if actual_chars < self.config.min_analysis_chars {
            return Err(ValidationError::TextTooShort {
                min_chars: self.config.min_analysis_chars,
                actual_chars,
            });
        }
        Ok(())
    }
}

/// Provider keywords must satisfy the same bounds as `analysis::extract`.
fn check_keywords(keywords: &[KeywordResult], limit: usize) -> Result<(), ProviderError> {
    if keywords.len() > limit {
        return Err(ProviderError::InvalidResponse(format!(
            "{} keywords returned, limit {limit}",
            keywords.len()
        )));
    }

    let mut seen = HashSet::new();
    for keyword in keywords {
        if keyword.relevance > MAX_SCORE {
            return Err(ProviderError::InvalidResponse(format!(
                "keyword relevance {} is outside 0..=100",
                keyword.relevance
            )));
        }
        if keyword.frequency == 0 {
            return Err(ProviderError::InvalidResponse(format!(
                "keyword `{}` has zero frequency",
                keyword.keyword
            )));
        }
        if !seen.insert(keyword.keyword.as_str()) {
            return Err(ProviderError::InvalidResponse(format!(
                "duplicate keyword `{}`",
                keyword.keyword
            )));
        }
    }
    Ok(())
}
