//! Reconciliation between the nested editing model and the flat
//! scheduling-unit records used by persistence and exchange.
//!
//! [`expand`] turns a course and its sections into one flat record per
//! (section, split part). [`group`] rebuilds the nested structure from
//! flat records, keyed by the persisted section id (falling back to the
//! section identifier for unsaved data). The two are inverses up to
//! two-decimal rounding.

use serde::{Deserialize, Serialize};

use crate::duration::round2;
use crate::model::course::CourseDraft;
use crate::model::section::{InstructorRef, Section, SectionStatus};
use crate::model::split::{RoomCategoryRef, SplitPart, SplitSet};

/// One flat scheduling unit: a single split part of a single section,
/// carrying the course fields alongside.
///
/// This is the outbound wire shape; field names follow the persisted
/// contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleUnit {
    /// Persisted unit id, absent for records that only exist in memory.
    pub id: Option<i64>,
    pub section_id: Option<i64>,
    pub title: String,
    pub code: String,
    pub major: String,
    pub color: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub instructor_id: Option<i64>,

    /// Declared total duration of the course.
    pub duration: f64,
    pub capacity: u32,
    pub status: String,

    /// Section identifier within the course.
    pub section: String,

    /// Duration of this one split part.
    pub separated_duration: f64,
    pub prefer_class_room_type_name: Option<String>,
}

/// The inbound nested shape for creating a course with its sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub code: String,
    pub title: String,
    pub majors_list: Vec<String>,
    pub color: String,
    pub duration: f64,
    pub capacity: u32,
    pub sections_list: Vec<SectionPayload>,
}

/// The inbound nested shape for updating a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub code: String,
    pub title: String,
    pub majors_list: Vec<String>,
    pub color: String,
    pub duration: f64,
    pub capacity: u32,
    pub sections_list: Vec<SectionPayload>,

    /// Persisted ids of sections removed during the edit session.
    pub sections_to_delete: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPayload {
    pub section: String,
    pub section_id: Option<i64>,
    pub instructor_id: Option<i64>,
    pub status: String,
    pub prefer_class_room_type: Option<CategoryPayload>,
    pub split_durations: Vec<SplitDurationPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitDurationPayload {
    pub separated_duration: f64,
}

/// A nested course rebuilt from flat records.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedCourse {
    pub course: CourseDraft,
    pub sections: Vec<Section>,
}

/// Read-only per-course summary synthesized while grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseView {
    pub code: String,
    pub title: String,
    pub major: String,
    pub color: String,
    pub capacity: u32,

    /// The declared total duration, from the course fields.
    pub declared_duration: f64,

    /// Sum of all split-part durations across the course's sections.
    pub combined_duration: f64,
    pub section_count: usize,
}

/// Result of grouping a batch of flat records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupedCourses {
    pub courses: Vec<GroupedCourse>,
    pub views: Vec<CourseView>,
}

/// Flatten a course and its sections into one record per split part.
///
/// Records appear in section order, then part order within the section.
#[must_use]
pub fn expand(course: &CourseDraft, sections: &[Section]) -> Vec<ScheduleUnit> {
    let mut units = Vec::new();
    for section in sections {
        for part in section.splits.parts() {
            units.push(ScheduleUnit {
                id: None,
                section_id: section.persisted_id,
                title: course.title.clone(),
                code: course.code.clone(),
                major: course.major.clone(),
                color: course.color.clone(),
                first_name: section.instructor.as_ref().map(|i| i.first_name.clone()),
                last_name: section.instructor.as_ref().map(|i| i.last_name.clone()),
                instructor_id: section.instructor.as_ref().map(|i| i.id),
                duration: course.duration,
                capacity: course.capacity,
                status: section.status.as_str().to_string(),
                section: section.identifier.clone(),
                separated_duration: part.duration,
                prefer_class_room_type_name: part.category.as_ref().map(|c| c.name.clone()),
            });
        }
    }
    units
}

/// Rebuild nested courses from flat records.
///
/// Sections are keyed by persisted section id when present, otherwise by
/// the trimmed section identifier (case-insensitive). Course fields come
/// from the first record of each course; part order follows input order.
#[must_use]
pub fn group(units: &[ScheduleUnit]) -> GroupedCourses {
    let mut courses: Vec<GroupedCourse> = Vec::new();
    let mut combined: Vec<f64> = Vec::new();

    for unit in units {
        let course_idx = match courses
            .iter()
            .position(|c| c.course.code.eq_ignore_ascii_case(&unit.code))
        {
            Some(idx) => idx,
            None => {
                courses.push(GroupedCourse {
                    course: CourseDraft {
                        code: unit.code.clone(),
                        title: unit.title.clone(),
                        major: unit.major.clone(),
                        color: unit.color.clone(),
                        duration: unit.duration,
                        capacity: unit.capacity,
                    },
                    sections: Vec::new(),
                });
                combined.push(0.0);
                courses.len() - 1
            }
        };
        combined[course_idx] += unit.separated_duration;

        let part = part_from_unit(unit);
        let sections = &mut courses[course_idx].sections;
        if let Some(section) = sections.iter_mut().find(|s| same_section(s, unit)) {
            section.splits.push_part(part);
        } else {
            sections.push(section_from_unit(unit, part));
        }
    }

    let views = courses
        .iter()
        .zip(&combined)
        .map(|(grouped, &total)| CourseView {
            code: grouped.course.code.clone(),
            title: grouped.course.title.clone(),
            major: grouped.course.major.clone(),
            color: grouped.course.color.clone(),
            capacity: grouped.course.capacity,
            declared_duration: grouped.course.duration,
            combined_duration: round2(total),
            section_count: grouped.sections.len(),
        })
        .collect();

    GroupedCourses { courses, views }
}

/// Build the nested creation request for a submittable session.
#[must_use]
pub fn to_create_request(course: &CourseDraft, sections: &[Section]) -> CreateCourseRequest {
    CreateCourseRequest {
        code: course.code.trim().to_string(),
        title: course.title.trim().to_string(),
        majors_list: vec![course.major.clone()],
        color: course.color.clone(),
        duration: course.duration,
        capacity: course.capacity,
        sections_list: sections.iter().map(section_payload).collect(),
    }
}

/// Build the nested update request, including session deletions.
#[must_use]
pub fn to_update_request(
    course: &CourseDraft,
    sections: &[Section],
    sections_to_delete: &[i64],
) -> UpdateCourseRequest {
    let create = to_create_request(course, sections);
    UpdateCourseRequest {
        code: create.code,
        title: create.title,
        majors_list: create.majors_list,
        color: create.color,
        duration: create.duration,
        capacity: create.capacity,
        sections_list: create.sections_list,
        sections_to_delete: sections_to_delete.to_vec(),
    }
}

fn section_payload(section: &Section) -> SectionPayload {
    let category = section
        .splits
        .parts()
        .iter()
        .find_map(|p| p.category.clone());
    SectionPayload {
        section: section.identifier.clone(),
        section_id: section.persisted_id,
        instructor_id: section.instructor.as_ref().map(|i| i.id),
        status: section.status.as_str().to_string(),
        prefer_class_room_type: category.map(|c| CategoryPayload {
            id: c.id,
            name: c.name,
        }),
        split_durations: section
            .splits
            .parts()
            .iter()
            .map(|p| SplitDurationPayload {
                separated_duration: p.duration,
            })
            .collect(),
    }
}

fn same_section(section: &Section, unit: &ScheduleUnit) -> bool {
    match (section.persisted_id, unit.section_id) {
        (Some(a), Some(b)) => a == b,
        (None, None) => section
            .identifier
            .trim()
            .eq_ignore_ascii_case(unit.section.trim()),
        _ => false,
    }
}

fn part_from_unit(unit: &ScheduleUnit) -> SplitPart {
    let mut part = SplitPart::new(unit.separated_duration);
    if let Some(name) = &unit.prefer_class_room_type_name {
        part = part.with_category(RoomCategoryRef::named(name.clone()));
    }
    part
}

fn section_from_unit(unit: &ScheduleUnit, first_part: SplitPart) -> Section {
    let mut section = Section::new(unit.section.clone(), first_part.duration);
    section.persisted_id = unit.section_id;
    section.status = SectionStatus::parse(&unit.status).unwrap_or_default();
    section.instructor = match (unit.instructor_id, &unit.first_name, &unit.last_name) {
        (Some(id), Some(first), last) => Some(InstructorRef::new(
            id,
            first.clone(),
            last.clone().unwrap_or_default(),
        )),
        _ => None,
    };
    if let Ok(splits) = SplitSet::from_parts(vec![first_part]) {
        section.splits = splits;
    }
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::approx_eq;

    fn course() -> CourseDraft {
        CourseDraft::new("CS101", "Intro to Programming")
            .with_major("Computer Science")
            .with_color("teal")
            .with_duration(2.5)
            .with_capacity(40)
    }

    fn sections() -> Vec<Section> {
        let mut a1 = Section::new("A1", 2.5)
            .with_persisted_id(11)
            .with_instructor(InstructorRef::new(1, "Grace", "Hopper"));
        a1.splits.update_duration(0, 1.5).unwrap();
        a1.splits.add_part(1.0);
        a1.splits
            .set_category(1, RoomCategoryRef::new(7, "Lab"))
            .unwrap();

        let a2 = Section::new("A2", 2.5)
            .with_persisted_id(12)
            .with_instructor(InstructorRef::new(2, "Ada", "Lovelace"))
            .with_status(SectionStatus::Online);

        vec![a1, a2]
    }

    #[test]
    fn test_expand_one_unit_per_part() {
        let units = expand(&course(), &sections());
        assert_eq!(units.len(), 3);

        // Section order, then part order.
        assert_eq!(units[0].section, "A1");
        assert_eq!(units[0].separated_duration, 1.5);
        assert_eq!(units[1].section, "A1");
        assert_eq!(units[1].separated_duration, 1.0);
        assert_eq!(
            units[1].prefer_class_room_type_name.as_deref(),
            Some("Lab")
        );
        assert_eq!(units[2].section, "A2");
        assert_eq!(units[2].status, "online");
        assert_eq!(units[2].first_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_group_rebuilds_sections() {
        let units = expand(&course(), &sections());
        let grouped = group(&units);
        assert_eq!(grouped.courses.len(), 1);

        let rebuilt = &grouped.courses[0];
        assert_eq!(rebuilt.course.code, "CS101");
        assert_eq!(rebuilt.sections.len(), 2);

        let a1 = &rebuilt.sections[0];
        assert_eq!(a1.identifier, "A1");
        assert_eq!(a1.persisted_id, Some(11));
        assert_eq!(a1.splits.len(), 2);
        assert_eq!(a1.splits.parts()[0].duration, 1.5);
        assert_eq!(a1.splits.parts()[1].duration, 1.0);
        assert_eq!(
            a1.splits.parts()[1].category.as_ref().map(|c| c.name.as_str()),
            Some("Lab")
        );
        assert_eq!(a1.instructor.as_ref().unwrap().display_name(), "Grace Hopper");

        let a2 = &rebuilt.sections[1];
        assert_eq!(a2.status, SectionStatus::Online);
        assert_eq!(a2.splits.len(), 1);
    }

    #[test]
    fn test_group_expand_round_trip() {
        let course = course();
        let original = sections();
        let grouped = group(&expand(&course, &original));
        let rebuilt = &grouped.courses[0].sections;

        assert_eq!(rebuilt.len(), original.len());
        for (a, b) in original.iter().zip(rebuilt.iter()) {
            assert_eq!(a.identifier, b.identifier);
            assert_eq!(a.persisted_id, b.persisted_id);
            assert_eq!(a.status, b.status);
            assert_eq!(a.splits.len(), b.splits.len());
            for (pa, pb) in a.splits.parts().iter().zip(b.splits.parts()) {
                assert!(approx_eq(pa.duration, pb.duration));
            }
        }
    }

    #[test]
    fn test_group_separates_courses_and_builds_views() {
        let mut units = expand(&course(), &sections());
        let other = CourseDraft::new("MA201", "Linear Algebra")
            .with_major("Mathematics")
            .with_duration(3.0);
        units.extend(expand(&other, &[Section::new("B1", 3.0)]));

        let grouped = group(&units);
        assert_eq!(grouped.courses.len(), 2);
        assert_eq!(grouped.views.len(), 2);

        let cs = &grouped.views[0];
        assert_eq!(cs.code, "CS101");
        assert_eq!(cs.section_count, 2);
        // 1.5 + 1.0 + 2.5 across both sections.
        assert_eq!(cs.combined_duration, 5.0);
        assert_eq!(cs.declared_duration, 2.5);

        let ma = &grouped.views[1];
        assert_eq!(ma.code, "MA201");
        assert_eq!(ma.combined_duration, 3.0);
    }

    #[test]
    fn test_group_falls_back_to_identifier_key() {
        // Unsaved records have no section id; the identifier groups them.
        let mut a1 = Section::new("A1", 2.5);
        a1.splits.update_duration(0, 1.5).unwrap();
        a1.splits.add_part(1.0);
        let units = expand(&course(), &[a1]);
        assert!(units.iter().all(|u| u.section_id.is_none()));

        let grouped = group(&units);
        assert_eq!(grouped.courses[0].sections.len(), 1);
        assert_eq!(grouped.courses[0].sections[0].splits.len(), 2);
    }

    #[test]
    fn test_create_request_shape() {
        let request = to_create_request(&course(), &sections());
        assert_eq!(request.majors_list, vec!["Computer Science"]);
        assert_eq!(request.sections_list.len(), 2);

        let a1 = &request.sections_list[0];
        assert_eq!(a1.section, "A1");
        assert_eq!(a1.instructor_id, Some(1));
        assert_eq!(a1.split_durations.len(), 2);
        assert_eq!(a1.split_durations[1].separated_duration, 1.0);
        assert_eq!(
            a1.prefer_class_room_type.as_ref().map(|c| c.name.as_str()),
            Some("Lab")
        );

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("majorsList").is_some());
        assert!(json.get("sectionsList").is_some());
        let first = &json["sectionsList"][0];
        assert!(first.get("splitDurations").is_some());
        assert!(first.get("instructorId").is_some());
    }

    #[test]
    fn test_update_request_carries_deletions() {
        let request = to_update_request(&course(), &sections(), &[42, 43]);
        assert_eq!(request.sections_to_delete, vec![42, 43]);

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("sectionsToDelete").is_some());
    }

    #[test]
    fn test_schedule_unit_wire_names() {
        let units = expand(&course(), &sections());
        let json = serde_json::to_value(&units[1]).unwrap();
        assert!(json.get("sectionId").is_some());
        assert!(json.get("separatedDuration").is_some());
        assert!(json.get("preferClassRoomTypeName").is_some());
        assert!(json.get("firstName").is_some());
    }
}
