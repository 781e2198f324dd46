//! CSV reading and writing of course rows.
//!
//! Import accepts any column order; headers are normalized (trimmed,
//! lowercased, spaces to underscores) before lookup. Export writes one
//! row per section, bracketing `separated_duration` when the section
//! has more than one part, so an exported file imports back unchanged.

use std::io;
use std::path::Path;

use optisched_core::reconcile::ScheduleUnit;

use crate::error::ExchangeResult;
use crate::row::RawRow;

/// Export column order.
pub const EXPORT_HEADER: [&str; 11] = [
    "code",
    "title",
    "section",
    "instructor_name",
    "major",
    "color",
    "status",
    "duration",
    "separated_duration",
    "capacity",
    "prefer_classroom_type",
];

/// Normalize a header cell: trim, lowercase, spaces to underscores.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Read all rows from CSV input, keyed by normalized headers.
pub fn read_rows<R: io::Read>(reader: R) -> ExchangeResult<Vec<RawRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    log::debug!("read {} rows from csv input", rows.len());
    Ok(rows)
}

pub fn read_rows_from_path(path: &Path) -> ExchangeResult<Vec<RawRow>> {
    let file = std::fs::File::open(path)?;
    read_rows(io::BufReader::new(file))
}

/// Write flat scheduling units as CSV, one row per section.
///
/// Consecutive units of the same section collapse into one row; a
/// multi-part section gets a bracketed `separated_duration` list.
pub fn write_units<W: io::Write>(writer: W, units: &[ScheduleUnit]) -> ExchangeResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADER)?;

    for section in collapse_sections(units) {
        let first = section[0];
        let separated = if section.len() == 1 {
            format_duration(first.separated_duration)
        } else {
            let parts: Vec<String> = section
                .iter()
                .map(|u| format_duration(u.separated_duration))
                .collect();
            format!("[{}]", parts.join(", "))
        };

        let instructor = match (&first.first_name, &first.last_name) {
            (Some(first_name), Some(last_name)) => format!("{first_name} {last_name}"),
            (Some(first_name), None) => first_name.clone(),
            _ => String::new(),
        };

        csv_writer.write_record([
            first.code.as_str(),
            first.title.as_str(),
            first.section.as_str(),
            instructor.as_str(),
            first.major.as_str(),
            first.color.as_str(),
            first.status.as_str(),
            format_duration(first.duration).as_str(),
            separated.as_str(),
            first.capacity.to_string().as_str(),
            section
                .iter()
                .find_map(|u| u.prefer_class_room_type_name.as_deref())
                .unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_units_to_path(path: &Path, units: &[ScheduleUnit]) -> ExchangeResult<()> {
    let file = std::fs::File::create(path)?;
    write_units(io::BufWriter::new(file), units)
}

/// Dated export file name, e.g. `courses_export_2026-08-30.csv`.
#[must_use]
pub fn export_file_name() -> String {
    format!(
        "courses_export_{}.csv",
        chrono::Local::now().format("%Y-%m-%d")
    )
}

/// Group consecutive units into sections, keyed by persisted id when
/// present, otherwise by (code, identifier).
fn collapse_sections(units: &[ScheduleUnit]) -> Vec<Vec<&ScheduleUnit>> {
    let mut sections: Vec<Vec<&ScheduleUnit>> = Vec::new();
    for unit in units {
        match sections.last_mut() {
            Some(section) if same_section(section[0], unit) => section.push(unit),
            _ => sections.push(vec![unit]),
        }
    }
    sections
}

fn same_section(a: &ScheduleUnit, b: &ScheduleUnit) -> bool {
    if let (Some(a_id), Some(b_id)) = (a.section_id, b.section_id) {
        return a_id == b_id;
    }
    a.code.eq_ignore_ascii_case(&b.code) && a.section.trim().eq_ignore_ascii_case(b.section.trim())
}

/// Render a duration without a trailing `.0` on whole hours.
fn format_duration(value: f64) -> String {
    if (value - value.trunc()).abs() < f64::EPSILON {
        format!("{}", value.trunc() as i64)
    } else {
        format!("{value}")
    }
}
