//! Worksheet files and the reference table the CLI works against.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dose_core::Worksheet;
use dose_standards::{NuclideTable, nuclide_table_override};
use tracing::debug;

/// Reads, validates and recomputes a worksheet document.
pub fn load_worksheet(path: &Path) -> Result<Worksheet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read worksheet {}", path.display()))?;
    let mut worksheet: Worksheet = serde_json::from_str(&text)
        .with_context(|| format!("parse worksheet {}", path.display()))?;
    worksheet
        .validate()
        .with_context(|| format!("invalid worksheet {}", path.display()))?;
    worksheet.recompute_all();
    debug!(path = %path.display(), tasks = worksheet.tasks().len(), "loaded worksheet");
    Ok(worksheet)
}

/// Writes a worksheet as pretty-printed JSON.
pub fn save_worksheet(path: &Path, worksheet: &Worksheet) -> Result<()> {
    let mut text = serde_json::to_string_pretty(worksheet).context("serialize worksheet")?;
    text.push('\n');
    fs::write(path, text).with_context(|| format!("write worksheet {}", path.display()))?;
    debug!(path = %path.display(), "saved worksheet");
    Ok(())
}

/// Loads the nuclide table from `--nuclide-table`, the environment, or the
/// embedded copy, in that order.
pub fn load_nuclide_table(explicit: Option<PathBuf>) -> Result<NuclideTable> {
    let path = nuclide_table_override(explicit);
    NuclideTable::load_or_embedded(path.as_deref()).context("load nuclide table")
}
