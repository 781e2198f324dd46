//! Per-row validation of imported tabular data.
//!
//! A raw row is a bag of normalized-header cells. [`parse_row`] runs the
//! full check sequence against the catalog and either yields the row's
//! flat scheduling units (one per split part) or every problem found,
//! so a bad row is reported completely in one pass.

use std::collections::HashMap;
use std::fmt;

use optisched_core::duration::round2;
use optisched_core::model::color;
use optisched_core::model::section::SectionStatus;
use optisched_core::reconcile::ScheduleUnit;

use crate::catalog::Catalog;

/// Maximum declared duration accepted from a row, in decimal hours.
const MAX_DURATION_HOURS: f64 = 6.0;

/// Maximum capacity accepted from a row.
const MAX_CAPACITY: u32 = 100;

/// One cell-level problem in an imported row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// 1-based data row number (excluding the header).
    pub row: usize,
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}: {}", self.row, self.field, self.message)
    }
}

/// A raw imported row, keyed by normalized header names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    values: HashMap<String, String>,
}

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Trimmed cell value; empty cells read as absent.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl FromIterator<(String, String)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Parse a `separated_duration` cell: either a bare positive number or
/// a bracketed comma-separated list of positive numbers.
pub fn parse_separated_durations(cell: &str) -> Result<Vec<f64>, String> {
    let cell = cell.trim();
    if let Some(inner) = cell.strip_prefix('[') {
        let Some(inner) = inner.strip_suffix(']') else {
            return Err("missing closing bracket".to_string());
        };
        let mut parts = Vec::new();
        for piece in inner.split(',') {
            parts.push(parse_positive(piece)?);
        }
        if parts.is_empty() {
            return Err("empty duration list".to_string());
        }
        Ok(parts)
    } else {
        Ok(vec![parse_positive(cell)?])
    }
}

fn parse_positive(piece: &str) -> Result<f64, String> {
    let piece = piece.trim();
    let value: f64 = piece
        .parse()
        .map_err(|_| format!("not a number: {piece:?}"))?;
    if value <= 0.0 {
        return Err(format!("duration must be positive, got {value}"));
    }
    Ok(round2(value))
}

/// Validate one row against the catalog.
///
/// Returns the row's scheduling units (one per split part) on success,
/// or every field error found. Checks run in a fixed order: required
/// cells, catalog cross-references, format constraints, then the
/// `separated_duration` list.
pub fn parse_row(
    raw: &RawRow,
    row: usize,
    catalog: &Catalog,
) -> Result<Vec<ScheduleUnit>, Vec<FieldError>> {
    let mut errors = Vec::new();

    let require = |field: &'static str, errors: &mut Vec<FieldError>| {
        let value = raw.get(field);
        if value.is_none() {
            errors.push(FieldError {
                row,
                field,
                message: format!("{field} is required"),
            });
        }
        value
    };

    let code = require("code", &mut errors);
    let title = require("title", &mut errors);
    let major = require("major", &mut errors);
    let color_cell = require("color", &mut errors);
    let status_cell = require("status", &mut errors);
    let duration_cell = require("duration", &mut errors);
    let capacity_cell = require("capacity", &mut errors);
    let section = require("section", &mut errors);

    // Catalog cross-references.
    let major_entry = major.and_then(|name| {
        let entry = catalog.resolve_major(name);
        if entry.is_none() {
            errors.push(FieldError {
                row,
                field: "major",
                message: format!(
                    "unknown major {:?}; available majors: {}",
                    name,
                    catalog.major_names().join(", ")
                ),
            });
        }
        entry
    });

    let instructor = raw.get("instructor_name").and_then(|name| {
        let entry = catalog.resolve_instructor(name);
        if entry.is_none() {
            errors.push(FieldError {
                row,
                field: "instructor_name",
                message: format!(
                    "unknown instructor {:?}; available instructors: {}",
                    name,
                    catalog.instructor_names().join(", ")
                ),
            });
        }
        entry
    });

    let category = raw.get("prefer_classroom_type").and_then(|name| {
        let entry = catalog.resolve_category(name);
        if entry.is_none() {
            errors.push(FieldError {
                row,
                field: "prefer_classroom_type",
                message: format!(
                    "unknown classroom type {:?}; available types: {}",
                    name,
                    catalog.category_names().join(", ")
                ),
            });
        }
        entry
    });

    // Format constraints.
    if let Some(value) = color_cell {
        if !color::is_valid(value) {
            errors.push(FieldError {
                row,
                field: "color",
                message: format!("unknown color {value:?}; use a hex value or a palette name"),
            });
        }
    }

    let status = status_cell.and_then(|value| {
        let status = SectionStatus::parse(value);
        if status.is_none() {
            errors.push(FieldError {
                row,
                field: "status",
                message: format!("status must be online or offline, got {value:?}"),
            });
        }
        status
    });

    let duration = duration_cell.and_then(|value| match value.parse::<f64>() {
        Ok(d) if d > 0.0 && d <= MAX_DURATION_HOURS => Some(round2(d)),
        Ok(d) => {
            errors.push(FieldError {
                row,
                field: "duration",
                message: format!(
                    "duration must be greater than 0 and at most {MAX_DURATION_HOURS}, got {d}"
                ),
            });
            None
        }
        Err(_) => {
            errors.push(FieldError {
                row,
                field: "duration",
                message: format!("not a number: {value:?}"),
            });
            None
        }
    });

    let capacity = capacity_cell.and_then(|value| match value.parse::<u32>() {
        Ok(c) if c <= MAX_CAPACITY => Some(c),
        Ok(c) => {
            errors.push(FieldError {
                row,
                field: "capacity",
                message: format!("capacity must be at most {MAX_CAPACITY}, got {c}"),
            });
            None
        }
        Err(_) => {
            errors.push(FieldError {
                row,
                field: "capacity",
                message: format!("not a whole number: {value:?}"),
            });
            None
        }
    });

    // Split durations: absent means one part at the declared duration.
    let separated = match raw.get("separated_duration") {
        Some(cell) => match parse_separated_durations(cell) {
            Ok(parts) => Some(parts),
            Err(message) => {
                errors.push(FieldError {
                    row,
                    field: "separated_duration",
                    message,
                });
                None
            }
        },
        None => duration.map(|d| vec![d]),
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // All checks passed, so every binding below is present.
    let (Some(code), Some(title), Some(major_entry), Some(color_cell)) =
        (code, title, major_entry, color_cell)
    else {
        return Err(errors);
    };
    let (Some(status), Some(duration), Some(capacity), Some(section), Some(separated)) =
        (status, duration, capacity, section, separated)
    else {
        return Err(errors);
    };

    let units = separated
        .into_iter()
        .map(|part| ScheduleUnit {
            id: None,
            section_id: None,
            title: title.to_string(),
            code: code.to_string(),
            major: major_entry.name.clone(),
            color: color_cell.to_string(),
            first_name: instructor.map(|i| i.first_name.clone()),
            last_name: instructor.map(|i| i.last_name.clone()),
            instructor_id: instructor.map(|i| i.id),
            duration,
            capacity,
            status: status.as_str().to_string(),
            section: section.to_string(),
            separated_duration: part,
            prefer_class_room_type_name: category.map(|c| c.name.clone()),
        })
        .collect();

    Ok(units)
}
