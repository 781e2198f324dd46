//! A course edit session: the draft fields, the section list, and the
//! bookkeeping needed to save the result.
//!
//! The session owns all mutable state for one course being created or
//! edited. Nothing here touches persistence; the caller turns a
//! submittable session into a request via [`crate::reconcile`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::course::CourseDraft;
use crate::model::ids::SectionId;
use crate::model::section::InstructorRef;
use crate::registry::SectionRegistry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEditSession {
    course: CourseDraft,
    registry: SectionRegistry,

    /// Persisted ids of sections removed during this session, reported
    /// to the store on save.
    sections_to_delete: Vec<i64>,

    /// Whether the system has any instructors; gates the
    /// instructor-required rule on new sections.
    instructors_known: bool,
}

impl CourseEditSession {
    /// Start a session for a new course.
    #[must_use]
    pub fn new(course: CourseDraft, instructors_known: bool) -> Self {
        Self {
            course,
            registry: SectionRegistry::new(),
            sections_to_delete: Vec::new(),
            instructors_known,
        }
    }

    /// Start a session over an existing course and its sections.
    #[must_use]
    pub fn for_existing(
        course: CourseDraft,
        registry: SectionRegistry,
        instructors_known: bool,
    ) -> Self {
        Self {
            course,
            registry,
            sections_to_delete: Vec::new(),
            instructors_known,
        }
    }

    #[must_use]
    pub fn course(&self) -> &CourseDraft {
        &self.course
    }

    #[must_use]
    pub fn course_mut(&mut self) -> &mut CourseDraft {
        &mut self.course
    }

    #[must_use]
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    #[must_use]
    pub fn registry_mut(&mut self) -> &mut SectionRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn sections_to_delete(&self) -> &[i64] {
        &self.sections_to_delete
    }

    /// Add a section seeded with the course's current declared duration.
    pub fn add_section(
        &mut self,
        identifier: &str,
        instructor: Option<InstructorRef>,
    ) -> Result<SectionId> {
        self.registry.add_section(
            identifier,
            instructor,
            self.course.duration,
            self.instructors_known,
        )
    }

    /// Remove a section; if it was persisted, remember to delete it on
    /// save.
    pub fn remove_section(&mut self, id: SectionId) {
        if let Some(persisted_id) = self.registry.remove_section(id) {
            if !self.sections_to_delete.contains(&persisted_id) {
                self.sections_to_delete.push(persisted_id);
            }
        }
    }

    /// Change the declared total duration.
    ///
    /// Sections that are still unsplit (a single part) follow the new
    /// duration; sections the user has already divided keep their parts
    /// and will show as invalid until rebalanced.
    pub fn set_declared_duration(&mut self, duration: f64) -> Result<()> {
        self.course.duration = crate::duration::round2(duration);
        let duration = self.course.duration;

        let unsplit: Vec<SectionId> = self
            .registry
            .sections()
            .iter()
            .filter(|s| s.splits.len() == 1)
            .map(|s| s.id)
            .collect();
        log::debug!(
            "declared duration now {}; following {} unsplit sections",
            duration,
            unsplit.len()
        );
        for id in unsplit {
            self.registry.splits_mut(id)?.update_duration(0, duration)?;
        }
        Ok(())
    }

    /// All problems blocking submission: draft field errors plus one
    /// split-invariant error per out-of-balance section.
    #[must_use]
    pub fn issues(&self) -> Vec<Error> {
        let mut issues = self.course.validate();
        for section in self.registry.sections() {
            if let Err(err) = section.splits.check(self.course.duration) {
                issues.push(err);
            }
        }
        if self.registry.is_empty() {
            issues.push(Error::Validation {
                field: "sections",
                message: "at least one section is required".to_string(),
            });
        }
        issues
    }

    /// Submittable when the draft validates and every section's split
    /// set matches the declared duration.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.course.is_valid() && self.registry.validate_all(self.course.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::section::{Section, SectionStatus};

    fn draft() -> CourseDraft {
        CourseDraft::new("CS101", "Intro to Programming")
            .with_major("Computer Science")
            .with_duration(2.5)
    }

    fn instructor() -> InstructorRef {
        InstructorRef::new(1, "Grace", "Hopper")
    }

    #[test]
    fn test_new_session_not_submittable_without_sections() {
        let session = CourseEditSession::new(draft(), true);
        assert!(!session.is_submittable());
        assert!(session
            .issues()
            .iter()
            .any(|e| matches!(e, Error::Validation { field: "sections", .. })));
    }

    #[test]
    fn test_section_seeded_with_declared_duration() {
        let mut session = CourseEditSession::new(draft(), true);
        let id = session.add_section("A1", Some(instructor())).unwrap();

        let section = session.registry().get(id).unwrap();
        assert_eq!(section.splits.total_duration(), 2.5);
        assert!(session.is_submittable());
    }

    #[test]
    fn test_duration_change_follows_unsplit_sections_only() {
        let mut session = CourseEditSession::new(draft(), true);
        let unsplit = session.add_section("A1", Some(instructor())).unwrap();
        let split = session.add_section("A2", Some(instructor())).unwrap();

        // Divide A2 into 1.5 + 1.0.
        let splits = session.registry_mut().splits_mut(split).unwrap();
        splits.add_part(1.0);
        splits.update_duration(0, 1.5).unwrap();

        session.set_declared_duration(3.0).unwrap();

        let unsplit_total = session.registry().get(unsplit).unwrap().splits.total_duration();
        let split_total = session.registry().get(split).unwrap().splits.total_duration();
        assert_eq!(unsplit_total, 3.0);
        assert_eq!(split_total, 2.5);

        // The divided section now blocks submission until rebalanced.
        assert!(!session.is_submittable());
        assert!(session
            .issues()
            .iter()
            .any(|e| matches!(e, Error::SplitInvariant { .. })));
    }

    #[test]
    fn test_removing_persisted_section_records_deletion() {
        let mut saved = Section::new("A1", 2.5).with_status(SectionStatus::Online);
        saved.persisted_id = Some(42);
        saved.instructor = Some(instructor());
        let saved_id = saved.id;

        let registry = SectionRegistry::from_sections(vec![saved]);
        let mut session = CourseEditSession::for_existing(draft(), registry, true);

        session.remove_section(saved_id);
        assert_eq!(session.sections_to_delete(), &[42]);

        // Removing an unsaved section records nothing.
        let id = session.add_section("B1", Some(instructor())).unwrap();
        session.remove_section(id);
        assert_eq!(session.sections_to_delete(), &[42]);
    }

    #[test]
    fn test_issues_include_draft_errors() {
        let mut session = CourseEditSession::new(draft(), true);
        session.add_section("A1", Some(instructor())).unwrap();
        session.course_mut().title = String::new();

        assert!(!session.is_submittable());
        assert!(session
            .issues()
            .iter()
            .any(|e| matches!(e, Error::Validation { field: "title", .. })));
    }
}
