//! The lookup catalog imports are validated against.
//!
//! Holds the known majors, instructors, room categories, and existing
//! course codes. All resolution is by trimmed, case-insensitive exact
//! match; the name lists feed "available values" error messages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorEntry {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorEntry {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl InstructorEntry {
    /// "First Last", the form instructor cells use.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub majors: Vec<MajorEntry>,
    #[serde(default)]
    pub instructors: Vec<InstructorEntry>,
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,

    /// Course codes already present in the system.
    #[serde(default)]
    pub existing_codes: Vec<String>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_majors(mut self, majors: Vec<MajorEntry>) -> Self {
        self.majors = majors;
        self
    }

    #[must_use]
    pub fn with_instructors(mut self, instructors: Vec<InstructorEntry>) -> Self {
        self.instructors = instructors;
        self
    }

    #[must_use]
    pub fn with_categories(mut self, categories: Vec<CategoryEntry>) -> Self {
        self.categories = categories;
        self
    }

    #[must_use]
    pub fn with_existing_codes(mut self, codes: Vec<String>) -> Self {
        self.existing_codes = codes;
        self
    }

    #[must_use]
    pub fn resolve_major(&self, name: &str) -> Option<&MajorEntry> {
        let name = name.trim();
        self.majors
            .iter()
            .find(|m| m.name.trim().eq_ignore_ascii_case(name))
    }

    /// Resolve an instructor by display name ("First Last").
    #[must_use]
    pub fn resolve_instructor(&self, display_name: &str) -> Option<&InstructorEntry> {
        let display_name = display_name.trim();
        self.instructors
            .iter()
            .find(|i| i.display_name().eq_ignore_ascii_case(display_name))
    }

    #[must_use]
    pub fn resolve_category(&self, name: &str) -> Option<&CategoryEntry> {
        let name = name.trim();
        self.categories
            .iter()
            .find(|c| c.name.trim().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn has_course_code(&self, code: &str) -> bool {
        let code = code.trim();
        self.existing_codes
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(code))
    }

    #[must_use]
    pub fn major_names(&self) -> Vec<&str> {
        self.majors.iter().map(|m| m.name.as_str()).collect()
    }

    #[must_use]
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    #[must_use]
    pub fn instructor_names(&self) -> Vec<String> {
        self.instructors.iter().map(|i| i.display_name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new()
            .with_majors(vec![
                MajorEntry {
                    id: 1,
                    name: "Computer Science".to_string(),
                },
                MajorEntry {
                    id: 2,
                    name: "Mathematics".to_string(),
                },
            ])
            .with_instructors(vec![InstructorEntry {
                id: 4,
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
            }])
            .with_categories(vec![CategoryEntry {
                id: 7,
                name: "Lab".to_string(),
            }])
            .with_existing_codes(vec!["CS900".to_string()])
    }

    #[test]
    fn test_resolve_major_case_insensitive() {
        let catalog = catalog();
        assert_eq!(catalog.resolve_major("computer science").map(|m| m.id), Some(1));
        assert_eq!(catalog.resolve_major(" Mathematics ").map(|m| m.id), Some(2));
        assert!(catalog.resolve_major("Physics").is_none());
    }

    #[test]
    fn test_resolve_instructor_by_display_name() {
        let catalog = catalog();
        assert_eq!(catalog.resolve_instructor("grace hopper").map(|i| i.id), Some(4));
        assert!(catalog.resolve_instructor("Grace").is_none());
    }

    #[test]
    fn test_resolve_category() {
        let catalog = catalog();
        assert_eq!(catalog.resolve_category("LAB").map(|c| c.id), Some(7));
        assert!(catalog.resolve_category("Studio").is_none());
    }

    #[test]
    fn test_existing_code_check() {
        let catalog = catalog();
        assert!(catalog.has_course_code("cs900"));
        assert!(catalog.has_course_code(" CS900 "));
        assert!(!catalog.has_course_code("CS101"));
    }

    #[test]
    fn test_name_lists() {
        let catalog = catalog();
        assert_eq!(catalog.major_names(), vec!["Computer Science", "Mathematics"]);
        assert_eq!(catalog.instructor_names(), vec!["Grace Hopper"]);
    }
}
