//! Results cache coordinator.
//!
//! Memoizes compiled results per student. At most one computation per
//! student runs at a time; concurrent callers join it. Invalidation moves the
//! student to a fresh generation so a computation that started before the
//! invalidation can never repopulate the cache.

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::Instrument;
use uuid::Uuid;

use transcript_core::traits::{cache_key, CacheStore, EnrollmentSource};
use transcript_core::{compile, ResultsError, StudentResults};

type Computation = Shared<BoxFuture<'static, Result<Arc<StudentResults>, ResultsError>>>;

type SlotRef = Arc<tokio::sync::Mutex<Slot>>;

/// Per-student coordination state.
struct Slot {
    generation: u64,
    in_flight: Option<Computation>,
}

struct Inner {
    source: Arc<dyn EnrollmentSource>,
    store: Arc<dyn CacheStore>,
    ttl: Duration,
    // Generations are unique across slots, so a slot recreated after release
    // never matches a computation started under its predecessor.
    next_generation: AtomicU64,
    // Registry lock is only held to look up or release a slot, never across `.await`.
    slots: Mutex<HashMap<Uuid, SlotRef>>,
}

/// Serves compiled results through a cache, one computation per student.
///
/// Cheap to clone; clones share the same registry and collaborators.
#[derive(Clone)]
pub struct ResultsCoordinator {
    inner: Arc<Inner>,
}

impl ResultsCoordinator {
    pub fn new(
        source: Arc<dyn EnrollmentSource>,
        store: Arc<dyn CacheStore>,
        ttl: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                store,
                ttl,
                next_generation: AtomicU64::new(0),
                slots: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Get a student's results, computing them on a cache miss.
    ///
    /// Dropping the returned future does not cancel a computation other
    /// callers may be waiting on; it runs to completion and fills the cache.
    #[tracing::instrument(skip_all, fields(student_id = %student_id))]
    pub async fn get_results(&self, student_id: Uuid) -> Result<Arc<StudentResults>, ResultsError> {
        let slot = self.inner.slot(student_id);
        let outcome = self.join_or_start(student_id, &slot).await;
        self.inner.release(student_id, slot);
        outcome
    }

    async fn join_or_start(
        &self,
        student_id: Uuid,
        slot: &SlotRef,
    ) -> Result<Arc<StudentResults>, ResultsError> {
        let computation = {
            let mut state = slot.lock().await;
            if let Some(in_flight) = state.in_flight.clone() {
                tracing::debug!("joining in-flight computation");
                in_flight
            } else {
                // Cache reads are serialized per student; only the enrollment
                // fetch is guaranteed to run without the slot lock.
                if let Some(results) = self.inner.read_cached(student_id).await? {
                    return Ok(results);
                }
                let computation = Inner::start(
                    Arc::clone(&self.inner),
                    student_id,
                    Arc::clone(slot),
                    state.generation,
                );
                state.in_flight = Some(computation.clone());
                computation
            }
        };

        computation.await
    }

    /// Discard a student's cached results.
    ///
    /// Must be called whenever one of the student's grades is created,
    /// updated, published or unpublished.
    #[tracing::instrument(skip_all, fields(student_id = %student_id))]
    pub async fn invalidate(&self, student_id: Uuid) -> Result<(), ResultsError> {
        let slot = self.inner.slot(student_id);
        let outcome = self.inner.invalidate_slot(student_id, &slot).await;
        self.inner.release(student_id, slot);
        outcome
    }
}

impl Inner {
    fn next_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::Relaxed)
    }

    fn slot(&self, student_id: Uuid) -> SlotRef {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.entry(student_id).or_insert_with(|| {
            Arc::new(tokio::sync::Mutex::new(Slot {
                generation: self.next_generation(),
                in_flight: None,
            }))
        });
        Arc::clone(slot)
    }

    /// Give back a slot handle, dropping the slot once nobody uses it.
    fn release(&self, student_id: Uuid, slot: SlotRef) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        drop(slot);
        // With the registry locked, a count of one means no caller or
        // computation can reach the slot any more.
        let idle = slots.get(&student_id).is_some_and(|existing| {
            Arc::strong_count(existing) == 1
                && existing
                    .try_lock()
                    .is_ok_and(|state| state.in_flight.is_none())
        });
        if idle {
            slots.remove(&student_id);
        }
    }

    async fn invalidate_slot(&self, student_id: Uuid, slot: &SlotRef) -> Result<(), ResultsError> {
        let mut state = slot.lock().await;

        state.generation = self.next_generation();
        if state.in_flight.take().is_some() {
            tracing::debug!("detached in-flight computation");
        }

        let key = cache_key(student_id);
        self.store.delete(&key).await.map_err(|e| {
            ResultsError::computation(&e.context(format!("failed to delete cache entry {key}")))
        })?;

        tracing::debug!(generation = state.generation, "invalidated cached results");
        Ok(())
    }

    async fn read_cached(
        &self,
        student_id: Uuid,
    ) -> Result<Option<Arc<StudentResults>>, ResultsError> {
        let key = cache_key(student_id);
        let cached = self.store.get(&key).await.map_err(|e| {
            ResultsError::computation(&e.context(format!("failed to read cache entry {key}")))
        })?;

        let Some(bytes) = cached else {
            return Ok(None);
        };
        match serde_json::from_slice::<StudentResults>(&bytes) {
            Ok(results) => {
                tracing::debug!("cache hit");
                Ok(Some(Arc::new(results)))
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding undecodable cache entry");
                Ok(None)
            }
        }
    }

    /// Spawn the computation so it outlives any individual caller.
    fn start(inner: Arc<Inner>, student_id: Uuid, slot: SlotRef, generation: u64) -> Computation {
        let span = tracing::info_span!("compute_results", %student_id, generation);
        let task = tokio::spawn(
            async move {
                let outcome = inner.compute(student_id, &slot, generation).await;
                inner.release(student_id, slot);
                outcome
            }
            .instrument(span),
        );

        async move {
            task.await.unwrap_or_else(|e| {
                Err(ResultsError::ComputationFailed(format!(
                    "results computation aborted: {e}"
                )))
            })
        }
        .boxed()
        .shared()
    }

    async fn compute(
        &self,
        student_id: Uuid,
        slot: &SlotRef,
        generation: u64,
    ) -> Result<Arc<StudentResults>, ResultsError> {
        // No lock is held while the source is queried. A panic in the source
        // or compiler becomes an ordinary failure so the slot is still cleared.
        let outcome = AssertUnwindSafe(self.fetch_and_compile(student_id))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(ResultsError::ComputationFailed(format!(
                    "results computation panicked: {}",
                    panic_message(&*panic)
                )))
            });

        let mut state = slot.lock().await;
        let current = state.generation == generation;
        if current {
            state.in_flight = None;
        }

        let results = outcome?;
        if !current {
            tracing::warn!("results invalidated during computation, not caching");
            return Ok(results);
        }

        let key = cache_key(student_id);
        let bytes = serde_json::to_vec(results.as_ref()).map_err(|e| {
            ResultsError::ComputationFailed(format!("failed to encode results: {e}"))
        })?;
        self.store.set(&key, bytes, self.ttl).await.map_err(|e| {
            ResultsError::computation(&e.context(format!("failed to write cache entry {key}")))
        })?;

        tracing::debug!(semesters = results.len(), "cached compiled results");
        Ok(results)
    }

    async fn fetch_and_compile(&self, student_id: Uuid) -> Result<Arc<StudentResults>, ResultsError> {
        let enrollments = self
            .source
            .list_enrollments(student_id)
            .await
            .map_err(|e| {
                ResultsError::computation(&e.context(format!(
                    "failed to list enrollments from {}",
                    self.source.name()
                )))
            })?;

        let results = compile(&enrollments)?;
        Ok(Arc::new(results))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
