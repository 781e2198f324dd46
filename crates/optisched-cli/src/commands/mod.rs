pub mod check;
pub mod export;
pub mod import;

pub use check::run_check;
pub use export::run_export;
pub use import::run_import;

use std::path::Path;

use anyhow::Result;

use optisched_core::reconcile::CreateCourseRequest;
use optisched_exchange::{build_requests, group_by_code, parse_row, tabular, BatchError, Catalog};
use optisched_exchange::row::FieldError;

/// Everything the validation pass produces for a CSV file.
pub(crate) struct Validated {
    pub requests: Vec<CreateCourseRequest>,
    pub row_errors: Vec<FieldError>,
    pub batch_errors: Vec<BatchError>,
    pub total_rows: usize,
}

/// Read and validate a CSV file down to submittable requests.
pub(crate) fn validate_file(path: &Path, catalog: &Catalog) -> Result<Validated> {
    let rows = tabular::read_rows_from_path(path)?;
    let total_rows = rows.len();

    let mut valid = Vec::new();
    let mut row_errors = Vec::new();
    for (index, raw) in rows.iter().enumerate() {
        match parse_row(raw, index + 1, catalog) {
            Ok(units) => valid.push(units),
            Err(errors) => row_errors.extend(errors),
        }
    }

    let (requests, batch_errors) = build_requests(group_by_code(valid), catalog);
    Ok(Validated {
        requests,
        row_errors,
        batch_errors,
        total_rows,
    })
}
