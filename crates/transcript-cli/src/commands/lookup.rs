//! The `transcript lookup` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use uuid::Uuid;

use transcript_cache::config::load_config_from;
use transcript_cache::{InMemoryCache, ResultsCoordinator, StaticSource};

pub async fn execute(
    student: String,
    data: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let student_id =
        Uuid::parse_str(student.trim()).with_context(|| format!("invalid student id: {student}"))?;

    let config = load_config_from(config_path.as_deref())?;
    let data_path = data
        .or(config.enrollments_file)
        .context("no enrollment data: pass --data or set enrollments_file in transcript.toml")?;

    let source = Arc::new(StaticSource::from_json_file(&data_path)?);
    let store = Arc::new(InMemoryCache::new());
    let coordinator = ResultsCoordinator::new(source, store, config.cache.ttl());

    let start = Instant::now();
    let results = coordinator.get_results(student_id).await?;
    tracing::info!(
        %student_id,
        semesters = results.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "lookup complete"
    );

    let label = student_id.to_string();
    super::print_results(&results, &format, Some(&label))
}
