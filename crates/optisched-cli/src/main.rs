use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use optisched_exchange::{Catalog, Config};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "optisched", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a catalog JSON file (majors, instructors, classroom
    /// types, existing course codes) that imports are validated against
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Validate a course CSV file without importing anything
    ///
    /// Reads the file, normalizes its headers, and runs every row through
    /// the full check sequence against the catalog:
    ///
    /// - Required cells (code, title, major, color, status, duration,
    ///   capacity, section)
    /// - Catalog cross-references (major, instructor, classroom type)
    /// - Format constraints (color, status, duration range, capacity range)
    /// - The separated_duration list, bare or bracketed
    ///
    /// Rows are then grouped into logical courses and the batch rules are
    /// applied (existing course codes, duplicate section identifiers).
    ///
    /// Output: one line per problem found, then a summary of how many
    /// courses would import. Exits non-zero when nothing would import.
    Check {
        /// Path to the CSV file
        path: PathBuf,
    },
    /// Import a course CSV file
    ///
    /// Validates the file exactly as 'optisched check' does, then submits
    /// each accepted course with a pacing delay between submissions.
    /// Failed submissions are reported and counted but never stop the
    /// batch. Accepted requests are written as JSON lines.
    Import {
        /// Path to the CSV file
        path: PathBuf,

        /// Write accepted requests as JSON lines here (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Delay between submissions in milliseconds (overrides config)
        #[arg(long)]
        pacing_ms: Option<u64>,
    },
    /// Export flat scheduling-unit records (JSON) to CSV
    ///
    /// Reads a JSON array of scheduling units and writes one CSV row per
    /// section, with multi-part sections bracketed so the file imports
    /// back unchanged.
    Export {
        /// Path to the JSON file of scheduling units
        path: PathBuf,

        /// Output CSV path (default: a dated file in the export directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse catalog file {}", path.display()))
        }
        None => {
            tracing::warn!("no catalog file given; cross-reference checks will reject all majors");
            Ok(Catalog::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let catalog = load_catalog(cli.catalog.as_ref())?;

    match cli.command {
        Commands::Check { path } => {
            commands::run_check(&path, &catalog)?;
        }
        Commands::Import { path, out, pacing_ms } => {
            let pacing = pacing_ms
                .map(std::time::Duration::from_millis)
                .unwrap_or_else(|| config.pacing());
            commands::run_import(&path, &catalog, out, pacing).await?;
        }
        Commands::Export { path, out } => {
            commands::run_export(&path, out, &config.export_dir)?;
        }
    }

    Ok(())
}
