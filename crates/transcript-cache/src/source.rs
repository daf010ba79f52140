//! In-process enrollment source.
//!
//! Serves enrollments from a map held in memory, loaded from JSON or built in
//! code. Used by the CLI and for exercising the coordinator without a
//! database.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use uuid::Uuid;

use transcript_core::model::Enrollment;
use transcript_core::traits::EnrollmentSource;

/// An [`EnrollmentSource`] over a fixed student → enrollments map.
///
/// Supports simulated latency and injected failures, and counts calls so
/// callers can observe how often the store is hit.
pub struct StaticSource {
    students: RwLock<HashMap<Uuid, Vec<Enrollment>>>,
    latency: Duration,
    failure: Mutex<Option<String>>,
    call_count: AtomicU32,
}

impl StaticSource {
    pub fn new(students: HashMap<Uuid, Vec<Enrollment>>) -> Self {
        Self {
            students: RwLock::new(students),
            latency: Duration::ZERO,
            failure: Mutex::new(None),
            call_count: AtomicU32::new(0),
        }
    }

    /// Parse a JSON object mapping student ids to enrollment lists.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let students: HashMap<Uuid, Vec<Enrollment>> =
            serde_json::from_str(json).context("failed to parse enrollment data")?;
        Ok(Self::new(students))
    }

    /// Load a JSON object mapping student ids to enrollment lists.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read enrollment data: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("invalid enrollment data in {}", path.display()))
    }

    /// Delay every lookup by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Replace a student's enrollments, as when a grade is entered or published.
    pub fn set_enrollments(&self, student_id: Uuid, enrollments: Vec<Enrollment>) {
        self.students
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(student_id, enrollments);
    }

    /// Make subsequent lookups fail with `message` until cleared with `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = message.map(str::to_string);
    }

    /// Student ids known to this source, sorted.
    pub fn student_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self
            .students
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        ids.sort();
        ids
    }

    /// Number of lookups served (including failed ones).
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EnrollmentSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn list_enrollments(&self, student_id: Uuid) -> Result<Vec<Enrollment>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        // Snapshot before the simulated round trip, like a query would.
        let snapshot = self
            .students
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&student_id)
            .cloned()
            .unwrap_or_default();
        let failure = self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(message) = failure {
            anyhow::bail!("{message}");
        }

        tracing::debug!(%student_id, enrollments = snapshot.len(), "listed enrollments");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"{
        "0c22f1f1-9184-4fd4-9b21-28c68a6a89dc": [
            {
                "course_unit": {"code": "CS101", "units": 3, "course_level": 1},
                "semester": {"id": 1, "name_ar": "", "name_en": "Fall 2024", "year": 2024, "term": "fall", "start_date": "2024-09-01"},
                "grade": {"total_score": 91, "is_published": true}
            }
        ]
    }"#;

    fn student() -> Uuid {
        Uuid::parse_str("0c22f1f1-9184-4fd4-9b21-28c68a6a89dc").unwrap()
    }

    #[tokio::test]
    async fn serves_known_and_unknown_students() {
        let source = StaticSource::from_json_str(DATA).unwrap();
        assert_eq!(source.list_enrollments(student()).await.unwrap().len(), 1);
        assert!(source
            .list_enrollments(Uuid::new_v4())
            .await
            .unwrap()
            .is_empty());
        assert_eq!(source.call_count(), 2);
        assert_eq!(source.student_ids(), vec![student()]);
    }

    #[tokio::test]
    async fn injected_failure() {
        let source = StaticSource::from_json_str(DATA).unwrap();
        source.set_failure(Some("database unavailable"));
        let err = source.list_enrollments(student()).await.unwrap_err();
        assert_eq!(err.to_string(), "database unavailable");

        source.set_failure(None);
        assert!(source.list_enrollments(student()).await.is_ok());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        std::fs::write(&path, DATA).unwrap();
        let source = StaticSource::from_json_file(&path).unwrap();
        assert_eq!(source.student_ids().len(), 1);

        let missing = StaticSource::from_json_file(&dir.path().join("nope.json"));
        assert!(missing.is_err());
    }
}
