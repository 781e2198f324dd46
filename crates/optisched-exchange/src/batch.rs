//! Batch assembly: validated rows into course creation requests.
//!
//! Each imported row describes one section of a logical course; rows
//! sharing a course code (case-insensitively) belong to the same course.
//! A logical course is rejected as a whole when its code already exists
//! in the system or when two of its rows claim the same section
//! identifier.

use std::fmt;

use optisched_core::reconcile::{
    CategoryPayload, CreateCourseRequest, ScheduleUnit, SectionPayload, SplitDurationPayload,
};

use crate::catalog::Catalog;

/// One course assembled from imported rows, before request building.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalCourse {
    /// Course code in its first-seen casing.
    pub code: String,

    /// One entry per row; each entry holds that section's units.
    pub sections: Vec<Vec<ScheduleUnit>>,
}

/// A problem that rejects a whole logical course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchError {
    pub code: String,
    pub message: String,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Group validated rows into logical courses by code, case-insensitively,
/// preserving first-seen order. Rows with duplicate section identifiers
/// are kept here and rejected by [`build_requests`].
#[must_use]
pub fn group_by_code(rows: Vec<Vec<ScheduleUnit>>) -> Vec<LogicalCourse> {
    let mut courses: Vec<LogicalCourse> = Vec::new();
    for row in rows {
        let Some(code) = row.first().map(|u| u.code.clone()) else {
            continue;
        };
        match courses
            .iter_mut()
            .find(|c| c.code.eq_ignore_ascii_case(&code))
        {
            Some(course) => course.sections.push(row),
            None => courses.push(LogicalCourse {
                code,
                sections: vec![row],
            }),
        }
    }
    courses
}

/// Turn logical courses into creation requests.
///
/// Courses whose code already exists in the catalog, or whose rows
/// repeat a section identifier, are dropped with a [`BatchError`];
/// the rest import normally.
#[must_use]
pub fn build_requests(
    courses: Vec<LogicalCourse>,
    catalog: &Catalog,
) -> (Vec<CreateCourseRequest>, Vec<BatchError>) {
    let mut requests = Vec::new();
    let mut errors = Vec::new();

    for course in courses {
        if catalog.has_course_code(&course.code) {
            errors.push(BatchError {
                code: course.code.clone(),
                message: "course code already exists in the system".to_string(),
            });
            continue;
        }

        if let Some(identifier) = first_duplicate_section(&course) {
            errors.push(BatchError {
                code: course.code.clone(),
                message: format!("duplicate section identifier: {identifier}"),
            });
            continue;
        }

        if let Some(request) = course_request(&course) {
            requests.push(request);
        }
    }

    (requests, errors)
}

fn first_duplicate_section(course: &LogicalCourse) -> Option<String> {
    let mut seen: Vec<&str> = Vec::new();
    for section in &course.sections {
        let identifier = section.first().map(|u| u.section.trim())?;
        if seen.iter().any(|s| s.eq_ignore_ascii_case(identifier)) {
            return Some(identifier.to_string());
        }
        seen.push(identifier);
    }
    None
}

fn course_request(course: &LogicalCourse) -> Option<CreateCourseRequest> {
    let first = course.sections.first()?.first()?;
    Some(CreateCourseRequest {
        code: course.code.clone(),
        title: first.title.clone(),
        majors_list: vec![first.major.clone()],
        color: first.color.clone(),
        duration: first.duration,
        capacity: first.capacity,
        sections_list: course
            .sections
            .iter()
            .filter_map(|units| section_payload(units))
            .collect(),
    })
}

fn section_payload(units: &[ScheduleUnit]) -> Option<SectionPayload> {
    let first = units.first()?;
    Some(SectionPayload {
        section: first.section.clone(),
        section_id: None,
        instructor_id: first.instructor_id,
        status: first.status.clone(),
        prefer_class_room_type: units
            .iter()
            .find_map(|u| u.prefer_class_room_type_name.clone())
            .map(|name| CategoryPayload { id: None, name }),
        split_durations: units
            .iter()
            .map(|u| SplitDurationPayload {
                separated_duration: u.separated_duration,
            })
            .collect(),
    })
}
