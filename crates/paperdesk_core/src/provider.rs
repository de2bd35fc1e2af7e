//! Pluggable analysis provider capability.
//!
//! # Responsibility
//! - Define the capability set a writing-assistant backend must offer.
//! - Ship the deterministic heuristic backend used by default.
//!
//! # Invariants
//! - Swapping providers never changes the shape of returned records.
//! - Provider calls are synchronous request/response; failures are returned,
//!   never retried or blocked on indefinitely.

use crate::analysis;
use crate::model::analysis::{CoherenceResult, DocumentAnalysis};
use crate::model::outline::{OutlineSection, PaperOutline};
use crate::outline::OUTLINE_SECTION_TITLES;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Backend family a provider belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Heuristic,
    RemoteModel,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::RemoteModel => "remote_model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Backend could not be reached or refused the request.
    Unavailable(String),
    /// Backend answered with something the engine cannot use.
    InvalidResponse(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "analysis provider unavailable: {message}"),
            Self::InvalidResponse(message) => {
                write!(f, "analysis provider returned invalid response: {message}")
            }
        }
    }
}

impl Error for ProviderError {}

/// Capability set consumed by the outline generator and writing assistant.
pub trait AnalysisProvider {
    fn kind(&self) -> ProviderKind;

    /// Drafts an outline for `topic`. The generator re-stamps ids and
    /// timestamps and enforces the section template afterwards.
    fn generate_outline(&self, topic: &str, description: &str) -> ProviderResult<PaperOutline>;

    fn analyze_text(&self, text: &str, keyword_limit: usize) -> ProviderResult<DocumentAnalysis>;

    fn analyze_paragraph(&self, text: &str) -> ProviderResult<CoherenceResult>;
}

const SECTION_DESCRIPTIONS: [&str; 6] = [
    "Introduce the topic, its background, and the research question.",
    "Review existing work and identify the gap this paper addresses.",
    "Describe the research design, data sources, and methods of analysis.",
    "Present the findings without interpretation.",
    "Interpret the findings, compare them with prior work, and note limitations.",
    "Summarize the contributions and suggest directions for future work.",
];

/// Deterministic default provider backed by `analysis` heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicProvider;

impl AnalysisProvider for HeuristicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Heuristic
    }

    fn generate_outline(&self, topic: &str, description: &str) -> ProviderResult<PaperOutline> {
        let sections = OUTLINE_SECTION_TITLES
            .iter()
            .zip(SECTION_DESCRIPTIONS)
            .map(|(title, summary)| OutlineSection::new(*title, summary))
            .collect();

        Ok(PaperOutline {
            id: Uuid::new_v4(),
            title: topic.to_string(),
            description: description.to_string(),
            created_at: 0,
            sections,
        })
    }

    fn analyze_text(&self, text: &str, keyword_limit: usize) -> ProviderResult<DocumentAnalysis> {
        Ok(analysis::analyze_document(text, keyword_limit))
    }

    fn analyze_paragraph(&self, text: &str) -> ProviderResult<CoherenceResult> {
        Ok(analysis::analyze_paragraph(text))
    }
}
