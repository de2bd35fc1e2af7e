//! Citation record and its validation rules.
//!
//! # Invariants
//! - `title` is non-empty after trimming.
//! - `authors` holds at least one non-blank name, in citation order.
//! - `id` never changes once assigned.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type CitationId = Uuid;

/// Bibliographic reference owned by the citation manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub id: CitationId,
    pub title: String,
    pub authors: Vec<String>,
    pub year: i32,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Key into the external PDF store. Stored and forwarded only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_id: Option<String>,
}

/// Caller input for creating a citation; the manager assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCitation {
    pub title: String,
    pub authors: Vec<String>,
    pub year: i32,
    pub source: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pdf_id: Option<String>,
}

impl NewCitation {
    pub fn new(
        title: impl Into<String>,
        authors: Vec<String>,
        year: i32,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors,
            year,
            source: source.into(),
            url: None,
            pdf_id: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_pdf_id(mut self, pdf_id: impl Into<String>) -> Self {
        self.pdf_id = Some(pdf_id.into());
        self
    }

    pub fn validate(&self) -> Result<(), CitationValidationError> {
        validate_fields(&self.title, &self.authors)
    }

    /// Consumes the draft and binds it to `id`.
    pub(crate) fn into_citation(self, id: CitationId) -> Citation {
        Citation {
            id,
            title: self.title,
            authors: self.authors,
            year: self.year,
            source: self.source,
            url: self.url,
            pdf_id: self.pdf_id,
        }
    }
}

impl Citation {
    pub fn validate(&self) -> Result<(), CitationValidationError> {
        validate_fields(&self.title, &self.authors)
    }
}

/// Rejected citation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationValidationError {
    EmptyTitle,
    NoAuthors,
    /// Author at this position is empty or whitespace-only.
    BlankAuthor(usize),
}

impl Display for CitationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "citation title must not be empty"),
            Self::NoAuthors => write!(f, "citation must list at least one author"),
            Self::BlankAuthor(index) => write!(f, "citation author #{index} is blank"),
        }
    }
}

impl Error for CitationValidationError {}

fn validate_fields(title: &str, authors: &[String]) -> Result<(), CitationValidationError> {
    if title.trim().is_empty() {
        return Err(CitationValidationError::EmptyTitle);
    }
    if authors.is_empty() {
        return Err(CitationValidationError::NoAuthors);
    }
    if let Some(index) = authors.iter().position(|name| name.trim().is_empty()) {
        return Err(CitationValidationError::BlankAuthor(index));
    }
    Ok(())
}
