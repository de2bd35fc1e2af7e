//! Outline generator and outline collection owner.
//!
//! # Responsibility
//! - Turn a topic/description pair into a six-section paper outline.
//! - Own the persisted outline collection and its edit/delete lifecycle.
//!
//! # Invariants
//! - Generated outlines have exactly the sections of `OUTLINE_SECTION_TITLES`,
//!   in that order, whichever provider drafted them.
//! - Outline and section ids are assigned here, never taken from the provider.
//! - Every mutation persists the whole collection before returning.

use crate::model::outline::{OutlineId, OutlineSection, OutlineValidationError, PaperOutline};
use crate::provider::{AnalysisProvider, ProviderError};
use crate::store::{CollectionStore, StorageError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Fixed section template for generated outlines.
pub const OUTLINE_SECTION_TITLES: [&str; 6] = [
    "Introduction",
    "Literature Review",
    "Methodology",
    "Results",
    "Discussion",
    "Conclusion",
];

#[derive(Debug)]
pub enum OutlineError {
    Validation(OutlineValidationError),
    Provider(ProviderError),
    Storage(StorageError),
}

impl Display for OutlineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Provider(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for OutlineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Provider(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<OutlineValidationError> for OutlineError {
    fn from(value: OutlineValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ProviderError> for OutlineError {
    fn from(value: ProviderError) -> Self {
        Self::Provider(value)
    }
}

impl From<StorageError> for OutlineError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Owner of the outline collection.
pub struct OutlineGenerator<S: CollectionStore> {
    store: S,
    collection: String,
    outlines: Vec<PaperOutline>,
}

impl<S: CollectionStore> OutlineGenerator<S> {
    /// Loads the backing collection. Undecodable data loads as empty.
    pub fn load(store: S, collection: impl Into<String>) -> Self {
        let collection = collection.into();
        let outlines = store.load(&collection);
        Self {
            store,
            collection,
            outlines,
        }
    }

    /// Generates, stores and returns a new outline.
    ///
    /// # Errors
    /// - `EmptyTopic` before the provider is called.
    /// - Provider failures unchanged.
    /// - `SectionCount`/`SectionOrder` when the provider breaks the template.
    /// - `Storage` when the write fails; the outline stays in memory.
    pub fn generate(
        &mut self,
        provider: &dyn AnalysisProvider,
        topic: &str,
        description: &str,
    ) -> Result<PaperOutline, OutlineError> {
        if topic.trim().is_empty() {
            return Err(OutlineValidationError::EmptyTopic.into());
        }

        let draft = provider.generate_outline(topic, description)?;
        if let Err(err) = enforce_template(&draft.sections) {
            warn!(
                "event=outline_generate module=outline status=rejected provider={} error={}",
                provider.kind().as_str(),
                err
            );
            return Err(err.into());
        }

        let outline = PaperOutline {
            id: Uuid::new_v4(),
            title: topic.to_string(),
            description: description.to_string(),
            created_at: now_epoch_ms(),
            sections: draft.sections.into_iter().map(restamp_ids).collect(),
        };

        self.outlines.push(outline.clone());
        self.persist()?;
        info!(
            "event=outline_generate module=outline status=ok provider={} outline_id={} sections={}",
            provider.kind().as_str(),
            outline.id,
            outline.sections.len()
        );
        Ok(outline)
    }

    /// Replaces a stored outline with an edited copy.
    ///
    /// `id` selects the target; its stored `created_at` is kept. Returns
    /// `Ok(false)` when no outline has that id.
    pub fn update(&mut self, mut outline: PaperOutline) -> Result<bool, OutlineError> {
        outline.validate()?;
        let Some(slot) = self.outlines.iter_mut().find(|item| item.id == outline.id) else {
            return Ok(false);
        };

        outline.created_at = slot.created_at;
        *slot = outline;
        self.persist()?;
        Ok(true)
    }

    /// Deletes an outline. Returns `Ok(false)` without writing when unknown.
    pub fn delete(&mut self, id: OutlineId) -> Result<bool, StorageError> {
        let Some(index) = self.outlines.iter().position(|item| item.id == id) else {
            return Ok(false);
        };

        self.outlines.remove(index);
        self.persist()?;
        info!("event=outline_delete module=outline status=ok outline_id={id}");
        Ok(true)
    }

    pub fn get(&self, id: OutlineId) -> Option<PaperOutline> {
        self.outlines.iter().find(|item| item.id == id).cloned()
    }

    /// Snapshot of all outlines in creation order.
    pub fn list(&self) -> Vec<PaperOutline> {
        self.outlines.clone()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save(&self.collection, &self.outlines)
    }
}

fn enforce_template(sections: &[OutlineSection]) -> Result<(), OutlineValidationError> {
    if sections.len() != OUTLINE_SECTION_TITLES.len() {
        return Err(OutlineValidationError::SectionCount {
            expected: OUTLINE_SECTION_TITLES.len(),
            actual: sections.len(),
        });
    }

    for (position, (section, expected)) in sections.iter().zip(OUTLINE_SECTION_TITLES).enumerate()
    {
        if section.title != expected {
            return Err(OutlineValidationError::SectionOrder {
                position,
                expected,
                actual: section.title.clone(),
            });
        }
    }
    Ok(())
}

fn restamp_ids(mut section: OutlineSection) -> OutlineSection {
    section.id = Uuid::new_v4();
    section.subsections = section.subsections.into_iter().map(restamp_ids).collect();
    section
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
