use serde::{Deserialize, Serialize};

use crate::model::ids::SectionId;
use crate::model::split::SplitSet;

/// Whether a section is offered online or on campus.
///
/// New sections default to offline, matching the persisted schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Online,
    #[default]
    Offline,
}

/// Canonical string names for each [`SectionStatus`] variant, matching
/// the values used in flat records and tabular files.
const STATUS_NAMES: &[(SectionStatus, &str)] = &[
    (SectionStatus::Online, "online"),
    (SectionStatus::Offline, "offline"),
];

impl SectionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        for &(status, name) in STATUS_NAMES {
            if status == self {
                return name;
            }
        }
        "offline"
    }

    /// Parse a status name (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        for &(status, canonical) in STATUS_NAMES {
            if canonical.eq_ignore_ascii_case(name.trim()) {
                return Some(status);
            }
        }
        None
    }
}

/// An instructor assignment on a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorRef {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl InstructorRef {
    #[must_use]
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "First Last", as shown in pickers and tabular files.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One section of a course within an edit session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Session-local handle, stable across edits.
    pub id: SectionId,

    /// Persisted section id, absent until the section has been saved.
    pub persisted_id: Option<i64>,

    /// User-facing section identifier ("A1", "Evening", ...).
    pub identifier: String,

    pub instructor: Option<InstructorRef>,
    pub status: SectionStatus,
    pub splits: SplitSet,
}

impl Section {
    /// Create a section with a single split part at the seed duration.
    #[must_use]
    pub fn new(identifier: impl Into<String>, seed_duration: f64) -> Self {
        Self {
            id: SectionId::new(),
            persisted_id: None,
            identifier: identifier.into(),
            instructor: None,
            status: SectionStatus::default(),
            splits: SplitSet::seeded(seed_duration),
        }
    }

    #[must_use]
    pub fn with_instructor(mut self, instructor: InstructorRef) -> Self {
        self.instructor = Some(instructor);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: SectionStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_persisted_id(mut self, id: i64) -> Self {
        self.persisted_id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_offline() {
        assert_eq!(SectionStatus::default(), SectionStatus::Offline);
        let section = Section::new("A1", 2.0);
        assert_eq!(section.status, SectionStatus::Offline);
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(SectionStatus::parse("online"), Some(SectionStatus::Online));
        assert_eq!(SectionStatus::parse("Online"), Some(SectionStatus::Online));
        assert_eq!(
            SectionStatus::parse(" OFFLINE "),
            Some(SectionStatus::Offline)
        );
        assert_eq!(SectionStatus::parse("hybrid"), None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [SectionStatus::Online, SectionStatus::Offline] {
            assert_eq!(SectionStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_instructor_display_name() {
        let instructor = InstructorRef::new(4, "Ada", "Lovelace");
        assert_eq!(instructor.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_new_section_seeds_splits() {
        let section = Section::new("B2", 3.0)
            .with_instructor(InstructorRef::new(1, "Grace", "Hopper"))
            .with_status(SectionStatus::Online);

        assert_eq!(section.splits.len(), 1);
        assert_eq!(section.splits.total_duration(), 3.0);
        assert_eq!(section.status, SectionStatus::Online);
        assert!(section.persisted_id.is_none());
    }
}
