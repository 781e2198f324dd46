//! The section list of one course edit session.
//!
//! Identifiers are unique per course, compared trimmed and
//! case-insensitively ("A1" and "a1" collide). When the system knows at
//! least one instructor, every new section must name one.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::ids::SectionId;
use crate::model::section::{InstructorRef, Section, SectionStatus};
use crate::model::split::SplitSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from existing sections, e.g. after grouping flat
    /// records. Duplicate identifiers in the input are kept as-is.
    #[must_use]
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Add a section, seeding its split set with one part at
    /// `seed_duration`.
    ///
    /// `instructors_known` says whether the system has any instructors at
    /// all; when it does, a section without one is rejected.
    pub fn add_section(
        &mut self,
        identifier: &str,
        instructor: Option<InstructorRef>,
        seed_duration: f64,
        instructors_known: bool,
    ) -> Result<SectionId> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(Error::Validation {
                field: "section",
                message: "section identifier is required".to_string(),
            });
        }
        if self.contains_identifier(identifier) {
            return Err(Error::DuplicateSection {
                identifier: identifier.to_string(),
            });
        }
        if instructors_known && instructor.is_none() {
            return Err(Error::MissingInstructor);
        }

        let mut section = Section::new(identifier, seed_duration);
        section.instructor = instructor;
        let id = section.id;
        self.sections.push(section);
        Ok(id)
    }

    /// Remove a section unconditionally; unknown ids are a no-op.
    ///
    /// Returns the persisted id of the removed section, when it had one.
    pub fn remove_section(&mut self, id: SectionId) -> Option<i64> {
        let index = self.sections.iter().position(|s| s.id == id)?;
        self.sections.remove(index).persisted_id
    }

    pub fn update_instructor(
        &mut self,
        id: SectionId,
        instructor: Option<InstructorRef>,
    ) -> Result<()> {
        self.section_mut(id)?.instructor = instructor;
        Ok(())
    }

    pub fn update_status(&mut self, id: SectionId, status: SectionStatus) -> Result<()> {
        self.section_mut(id)?.status = status;
        Ok(())
    }

    /// Mutable access to a section's split set, for part edits.
    pub fn splits_mut(&mut self, id: SectionId) -> Result<&mut SplitSet> {
        Ok(&mut self.section_mut(id)?.splits)
    }

    /// Returns `true` when every section's split set is valid against the
    /// declared course duration. An empty registry is not submittable.
    #[must_use]
    pub fn validate_all(&self, declared_total: f64) -> bool {
        !self.sections.is_empty()
            && self
                .sections
                .iter()
                .all(|s| s.splits.is_valid(declared_total))
    }

    #[must_use]
    pub fn contains_identifier(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        self.sections
            .iter()
            .any(|s| s.identifier.trim().eq_ignore_ascii_case(identifier))
    }

    fn section_mut(&mut self, id: SectionId) -> Result<&mut Section> {
        self.sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(Error::NotFound {
                entity: "section",
                id: id.to_string(),
            })
    }
}
