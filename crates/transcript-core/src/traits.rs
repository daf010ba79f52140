//! Collaborator trait definitions.
//!
//! The engine does not own storage. An [`EnrollmentSource`] supplies a
//! student's enrollments and a [`CacheStore`] holds serialized results; both
//! are implemented by the surrounding service (see `transcript-cache` for
//! in-process implementations).

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::Enrollment;

/// Supplies a student's enrollments with their course, semester and grade.
#[async_trait]
pub trait EnrollmentSource: Send + Sync {
    /// Human-readable source name (e.g. "postgres").
    fn name(&self) -> &str;

    /// List every enrollment for a student. An unknown student yields an
    /// empty list, not an error.
    async fn list_enrollments(&self, student_id: Uuid) -> anyhow::Result<Vec<Enrollment>>;
}

/// Key-value store for compiled results.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch an unexpired value.
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;

    /// Store a value that expires after `ttl`.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> anyhow::Result<()>;

    /// Remove a value. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}

/// Cache key for a student's compiled results.
pub fn cache_key(student_id: Uuid) -> String {
    format!("student:{student_id}")
}
