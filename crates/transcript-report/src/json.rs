//! JSON persistence of compiled results.

use std::path::Path;

use anyhow::{Context, Result};

use transcript_core::StudentResults;

/// Save results as pretty-printed JSON, creating parent directories.
pub fn save_json(results: &StudentResults, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results).context("failed to serialize results")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write results to {}", path.display()))?;
    Ok(())
}

/// Load results previously written by [`save_json`].
pub fn load_json(path: &Path) -> Result<StudentResults> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read results from {}", path.display()))?;
    let results: StudentResults =
        serde_json::from_str(&content).context("failed to parse results JSON")?;
    Ok(results)
}
