// src/core/dataset.rs
//! Local CSV preflight run before an upload. The file itself is transmitted
//! unmodified; this only reads it to report a row count.

use anyhow::{Context, Result};
use std::path::Path;

/// Count data rows (header excluded). Ragged rows are tolerated since the
/// backend owns the parsing semantics.
pub fn record_count(path: &Path) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut count = 0;
    for record in reader.records() {
        record.with_context(|| format!("Failed to read CSV record in {}", path.display()))?;
        count += 1;
    }
    Ok(count)
}
