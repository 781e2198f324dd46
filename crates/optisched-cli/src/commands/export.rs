use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use optisched_core::reconcile::ScheduleUnit;
use optisched_exchange::tabular;

pub fn run_export(path: &Path, out: Option<PathBuf>, export_dir: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let units: Vec<ScheduleUnit> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse scheduling units from {}", path.display()))?;

    let out_path = match out {
        Some(out_path) => out_path,
        None => {
            std::fs::create_dir_all(export_dir)
                .with_context(|| format!("Failed to create {}", export_dir.display()))?;
            export_dir.join(tabular::export_file_name())
        }
    };

    tabular::write_units_to_path(&out_path, &units)?;
    println!("✓ Exported {} records to {}", units.len(), out_path.display());
    Ok(())
}
