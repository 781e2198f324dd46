use anyhow::Result;
use std::path::Path;

use optisched_exchange::Catalog;

use crate::commands::validate_file;

pub fn run_check(path: &Path, catalog: &Catalog) -> Result<()> {
    tracing::info!("Checking {}", path.display());

    let validated = validate_file(path, catalog)?;

    for error in &validated.row_errors {
        println!("  ✗ {error}");
    }
    for error in &validated.batch_errors {
        println!("  ✗ {error}");
    }

    let problems = validated.row_errors.len() + validated.batch_errors.len();
    println!(
        "\n{} rows read, {} problems, {} courses would import",
        validated.total_rows,
        problems,
        validated.requests.len()
    );
    for request in &validated.requests {
        println!(
            "  ✓ {} ({} sections)",
            request.code,
            request.sections_list.len()
        );
    }

    if validated.requests.is_empty() {
        anyhow::bail!("nothing to import");
    }
    Ok(())
}
