use anyhow::Result;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use optisched_core::reconcile::{CreateCourseRequest, UpdateCourseRequest};
use optisched_exchange::{
    Catalog, CourseSink, ExchangeResult, ImportOutcome, ImportRunner,
};

use crate::commands::validate_file;

/// Writes each accepted request as one JSON line.
///
/// Stands in for the persistence collaborator: downstream tooling picks
/// the lines up from the file or stdout.
struct JsonLinesSink {
    writer: Box<dyn Write + Send>,
}

impl std::fmt::Debug for JsonLinesSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink").finish_non_exhaustive()
    }
}

#[async_trait]
impl CourseSink for JsonLinesSink {
    async fn create_course(&mut self, request: &CreateCourseRequest) -> ExchangeResult<()> {
        let line = serde_json::to_string(request)?;
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    async fn update_course(&mut self, request: &UpdateCourseRequest) -> ExchangeResult<()> {
        let line = serde_json::to_string(request)?;
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    async fn delete_section(&mut self, section_id: i64) -> ExchangeResult<()> {
        let line = serde_json::to_string(&serde_json::json!({ "deleteSection": section_id }))?;
        writeln!(self.writer, "{line}")?;
        Ok(())
    }
}

pub async fn run_import(
    path: &Path,
    catalog: &Catalog,
    out: Option<PathBuf>,
    pacing: Duration,
) -> Result<()> {
    tracing::info!("Importing {}", path.display());

    let validated = validate_file(path, catalog)?;
    for error in &validated.row_errors {
        println!("  ✗ {error}");
    }
    for error in &validated.batch_errors {
        println!("  ✗ {error}");
    }
    if validated.requests.is_empty() {
        anyhow::bail!("no valid courses to import");
    }

    let writer: Box<dyn Write + Send> = match &out {
        Some(out_path) => Box::new(std::fs::File::create(out_path)?),
        None => Box::new(std::io::stdout()),
    };
    let mut runner = ImportRunner::new(JsonLinesSink { writer }).with_pacing(pacing);

    let summary = runner
        .run_with_progress(&validated.requests, |progress| {
            tracing::info!(
                "progress: {}/{} ({} failed)",
                progress.completed + progress.failed,
                progress.total,
                progress.failed
            );
        })
        .await;

    for error in &summary.errors {
        eprintln!("  ✗ {error}");
    }
    match summary.outcome() {
        ImportOutcome::AllSucceeded => {
            println!("\n✓ Imported all {} courses", summary.completed);
        }
        ImportOutcome::PartiallySucceeded => {
            println!(
                "\n⚠ Imported {} of {} courses ({} failed)",
                summary.completed, summary.total, summary.failed
            );
        }
        ImportOutcome::NoneSucceeded => {
            anyhow::bail!("import failed: none of the {} courses were accepted", summary.total);
        }
    }
    Ok(())
}
