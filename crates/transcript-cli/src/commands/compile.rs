//! The `transcript compile` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(enrollments_path: PathBuf, format: String, output: Option<PathBuf>) -> Result<()> {
    let enrollments = super::read_enrollments(&enrollments_path)?;
    let results = transcript_core::compile(&enrollments)?;

    tracing::info!(
        enrollments = enrollments.len(),
        semesters = results.len(),
        "compiled results"
    );

    match output {
        Some(path) => {
            transcript_report::save_json(&results, &path)?;
            println!("Results written to {}", path.display());
        }
        None => super::print_results(&results, &format, None)?,
    }

    Ok(())
}
