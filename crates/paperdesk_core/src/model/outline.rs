//! Paper outline tree.
//!
//! # Responsibility
//! - Model an outline as a node + ordered children tree of sections.
//! - Provide id-addressed editing helpers for outline editors.
//!
//! # Invariants
//! - Section ids are unique within one outline, at every depth.
//! - Child order is the rendering order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type OutlineId = Uuid;
pub type SectionId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineSection {
    pub id: SectionId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub subsections: Vec<OutlineSection>,
}

impl OutlineSection {
    /// Creates a leaf section with a fresh id.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            subsections: Vec::new(),
        }
    }

    fn find(&self, id: SectionId) -> Option<&OutlineSection> {
        if self.id == id {
            return Some(self);
        }
        self.subsections.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: SectionId) -> Option<&mut OutlineSection> {
        if self.id == id {
            return Some(self);
        }
        self.subsections
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    fn collect_ids(&self, out: &mut Vec<SectionId>) {
        out.push(self.id);
        for child in &self.subsections {
            child.collect_ids(out);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperOutline {
    pub id: OutlineId,
    pub title: String,
    pub description: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub sections: Vec<OutlineSection>,
}

impl PaperOutline {
    /// Depth-first lookup by section id.
    pub fn find_section(&self, id: SectionId) -> Option<&OutlineSection> {
        self.sections.iter().find_map(|section| section.find(id))
    }

    pub fn find_section_mut(&mut self, id: SectionId) -> Option<&mut OutlineSection> {
        self.sections
            .iter_mut()
            .find_map(|section| section.find_mut(id))
    }

    /// Appends a new child under `parent_id`.
    ///
    /// Returns the new section id, or `None` when the parent does not exist.
    pub fn add_subsection(
        &mut self,
        parent_id: SectionId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Option<SectionId> {
        let parent = self.find_section_mut(parent_id)?;
        let child = OutlineSection::new(title, description);
        let child_id = child.id;
        parent.subsections.push(child);
        Some(child_id)
    }

    /// Removes a section and its whole subtree. Returns whether one was found.
    pub fn remove_section(&mut self, id: SectionId) -> bool {
        remove_from(&mut self.sections, id)
    }

    /// All section ids in depth-first order.
    pub fn section_ids(&self) -> Vec<SectionId> {
        let mut ids = Vec::new();
        for section in &self.sections {
            section.collect_ids(&mut ids);
        }
        ids
    }

    pub fn validate(&self) -> Result<(), OutlineValidationError> {
        let mut seen = HashSet::new();
        for id in self.section_ids() {
            if !seen.insert(id) {
                return Err(OutlineValidationError::DuplicateSectionId(id));
            }
        }
        Ok(())
    }
}

fn remove_from(sections: &mut Vec<OutlineSection>, id: SectionId) -> bool {
    if let Some(index) = sections.iter().position(|section| section.id == id) {
        sections.remove(index);
        return true;
    }
    sections
        .iter_mut()
        .any(|section| remove_from(&mut section.subsections, id))
}

/// Rejected outline input or provider output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineValidationError {
    EmptyTopic,
    SectionCount {
        expected: usize,
        actual: usize,
    },
    SectionOrder {
        position: usize,
        expected: &'static str,
        actual: String,
    },
    DuplicateSectionId(SectionId),
}

impl Display for OutlineValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTopic => write!(f, "outline topic must not be empty"),
            Self::SectionCount { expected, actual } => {
                write!(f, "outline must have {expected} sections, got {actual}")
            }
            Self::SectionOrder {
                position,
                expected,
                actual,
            } => write!(
                f,
                "outline section #{position} must be `{expected}`, got `{actual}`"
            ),
            Self::DuplicateSectionId(id) => write!(f, "duplicate outline section id: {id}"),
        }
    }
}

impl Error for OutlineValidationError {}

#[cfg(test)]
mod tests {
    use super::{OutlineSection, OutlineValidationError, PaperOutline};
    use uuid::Uuid;

    fn outline_with(sections: Vec<OutlineSection>) -> PaperOutline {
        PaperOutline {
            id: Uuid::new_v4(),
            title: "topic".to_string(),
            description: String::new(),
            created_at: 0,
            sections,
        }
    }

    #[test]
    fn add_subsection_nests_under_parent_and_is_findable() {
        let intro = OutlineSection::new("Introduction", "why");
        let intro_id = intro.id;
        let mut outline = outline_with(vec![intro]);

        let child_id = outline
            .add_subsection(intro_id, "Motivation", "gap in the literature")
            .unwrap();
        let grandchild_id = outline.add_subsection(child_id, "Prior art", "").unwrap();

        assert_eq!(outline.sections[0].subsections[0].id, child_id);
        assert_eq!(
            outline.find_section(grandchild_id).unwrap().title,
            "Prior art"
        );
        assert_eq!(
            outline.section_ids(),
            vec![intro_id, child_id, grandchild_id]
        );
        assert!(outline.add_subsection(Uuid::new_v4(), "x", "y").is_none());
    }

    #[test]
    fn remove_section_drops_nested_subtree() {
        let intro = OutlineSection::new("Introduction", "");
        let intro_id = intro.id;
        let mut outline = outline_with(vec![intro, OutlineSection::new("Conclusion", "")]);
        let child_id = outline.add_subsection(intro_id, "Child", "").unwrap();

        assert!(outline.remove_section(child_id));
        assert!(outline.find_section(child_id).is_none());
        assert!(!outline.remove_section(child_id));
        assert_eq!(outline.sections.len(), 2);
    }

    #[test]
    fn validate_rejects_duplicate_ids_at_any_depth() {
        let intro = OutlineSection::new("Introduction", "");
        let mut copy = OutlineSection::new("Copy", "");
        copy.id = intro.id;
        let duplicate = intro.id;
        let mut outline = outline_with(vec![intro]);
        outline.sections[0].subsections.push(copy);

        assert_eq!(
            outline.validate(),
            Err(OutlineValidationError::DuplicateSectionId(duplicate))
        );
    }
}
