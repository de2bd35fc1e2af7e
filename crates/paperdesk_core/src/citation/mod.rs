//! Citation manager.
//!
//! # Responsibility
//! - Own the persisted citation collection: add, update, delete, search.
//! - Render references in APA and MLA style.
//!
//! # Invariants
//! - Input is validated before an id is assigned or anything is written.
//! - Collection order is insertion order; updates keep a record's position.
//! - Every successful mutation persists the whole collection before returning.
//! - Read APIs return copies; callers cannot reach internal state.

mod format;

pub use format::{format_apa, format_mla, CitationStyle};

use crate::model::citation::{Citation, CitationId, CitationValidationError, NewCitation};
use crate::store::{CollectionStore, StorageError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

#[derive(Debug)]
pub enum CitationError {
    Validation(CitationValidationError),
    Storage(StorageError),
}

impl Display for CitationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CitationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<CitationValidationError> for CitationError {
    fn from(value: CitationValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for CitationError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Owner of the citation collection.
pub struct CitationManager<S: CollectionStore> {
    store: S,
    collection: String,
    citations: Vec<Citation>,
}

impl<S: CollectionStore> CitationManager<S> {
    /// Loads the backing collection. Undecodable data loads as empty.
    pub fn load(store: S, collection: impl Into<String>) -> Self {
        let collection = collection.into();
        let citations = store.load(&collection);
        Self {
            store,
            collection,
            citations,
        }
    }

    /// Validates, assigns an id, appends and persists.
    ///
    /// On `Storage` error the citation is already in memory but not durable.
    pub fn add(&mut self, draft: NewCitation) -> Result<Citation, CitationError> {
        draft.validate()?;

        let citation = draft.into_citation(Uuid::new_v4());
        self.citations.push(citation.clone());
        self.persist()?;
        info!(
            "event=citation_add module=citation status=ok citation_id={} authors={} has_pdf={}",
            citation.id,
            citation.authors.len(),
            citation.pdf_id.is_some()
        );
        Ok(citation)
    }

    /// Replaces the record with the same id, keeping its position.
    ///
    /// Returns `Ok(false)` without writing when the id is unknown.
    pub fn update(&mut self, citation: Citation) -> Result<bool, CitationError> {
        citation.validate()?;
        let Some(slot) = self.citations.iter_mut().find(|item| item.id == citation.id) else {
            return Ok(false);
        };

        *slot = citation;
        self.persist()?;
        Ok(true)
    }

    /// Removes a citation. Returns `Ok(false)` without writing when unknown.
    pub fn delete(&mut self, id: CitationId) -> Result<bool, StorageError> {
        let Some(index) = self.citations.iter().position(|item| item.id == id) else {
            return Ok(false);
        };

        self.citations.remove(index);
        self.persist()?;
        info!("event=citation_delete module=citation status=ok citation_id={id}");
        Ok(true)
    }

    pub fn get(&self, id: CitationId) -> Option<Citation> {
        self.citations.iter().find(|item| item.id == id).cloned()
    }

    /// Citations whose title contains any keyword, case-insensitively.
    ///
    /// Plain substring match: `""` matches every title.
    pub fn find_by_keyword<K: AsRef<str>>(&self, keywords: &[K]) -> Vec<Citation> {
        let needles: Vec<String> = keywords
            .iter()
            .map(|keyword| keyword.as_ref().to_lowercase())
            .collect();

        self.citations
            .iter()
            .filter(|citation| {
                let title = citation.title.to_lowercase();
                needles.iter().any(|needle| title.contains(needle.as_str()))
            })
            .cloned()
            .collect()
    }

    /// Snapshot of all citations in insertion order.
    pub fn list(&self) -> Vec<Citation> {
        self.citations.clone()
    }

    pub fn format_apa(&self, citation: &Citation) -> String {
        format_apa(citation)
    }

    pub fn format_mla(&self, citation: &Citation) -> String {
        format_mla(citation)
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save(&self.collection, &self.citations)
    }
}
