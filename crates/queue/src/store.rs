//! Job store — durable mapping from task id to job record.
//!
//! The store owns the terminal-state guarantee: once a job is `Succeeded` or
//! `Failed`, every further transition attempt is rejected, so polls of a
//! terminal job always return the same stored outcome.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use pathcraft_core::error::StoreError;
use pathcraft_core::job::{Job, JobStatus, TaskId};
use pathcraft_core::roadmap::RoadmapResult;

/// The job store trait.
///
/// Implementations: in-memory (default). The trait keeps the persistence
/// choice swappable without touching queue or gateway code.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// The store name (e.g. "in_memory").
    fn name(&self) -> &str;

    /// Insert a freshly created `Pending` job.
    async fn insert(&self, job: Job) -> Result<(), StoreError>;

    /// Transition a job to `Running` when a worker claims it.
    async fn mark_running(&self, task_id: &TaskId) -> Result<(), StoreError>;

    /// Transition a job to `Succeeded` with its result.
    async fn complete(&self, task_id: &TaskId, result: RoadmapResult) -> Result<(), StoreError>;

    /// Transition a job to `Failed` with an error description.
    async fn fail(&self, task_id: &TaskId, error: String) -> Result<(), StoreError>;

    /// Read a job record. Side-effect-free; repeated reads return identical
    /// records for terminal jobs.
    async fn get(&self, task_id: &TaskId) -> Result<Option<Job>, StoreError>;

    /// Total number of stored jobs.
    async fn count(&self) -> Result<usize, StoreError>;
}

/// Default number of jobs held before oldest terminal jobs are evicted.
const DEFAULT_MAX_JOBS: usize = 1_000;

/// An in-memory job store backed by a `HashMap` behind an `RwLock`.
///
/// All writes take the write guard, so status transitions on a given task id
/// are atomic and exclusive.
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<TaskId, Job>>,
    max_jobs: usize,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_JOBS)
    }

    pub fn with_capacity(max_jobs: usize) -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            max_jobs,
        }
    }
}

impl Default for InMemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn insert(&self, job: Job) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;

        // Evict the oldest terminal job when at capacity. Pending/Running
        // jobs are never evicted — a queued job must stay resolvable.
        if jobs.len() >= self.max_jobs {
            if let Some(oldest) = jobs
                .values()
                .filter(|j| j.status.is_terminal())
                .min_by_key(|j| j.submitted_at)
                .map(|j| j.task_id.clone())
            {
                jobs.remove(&oldest);
            }
        }

        jobs.insert(job.task_id.clone(), job);
        Ok(())
    }

    async fn mark_running(&self, task_id: &TaskId) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(task_id)
            .ok_or_else(|| StoreError::UnknownTask(task_id.to_string()))?;

        guard_not_terminal(job)?;
        job.status = JobStatus::Running;
        job.started_at = Some(Utc::now());
        Ok(())
    }

    async fn complete(&self, task_id: &TaskId, result: RoadmapResult) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(task_id)
            .ok_or_else(|| StoreError::UnknownTask(task_id.to_string()))?;

        guard_not_terminal(job)?;
        job.status = JobStatus::Succeeded;
        job.result = Some(result);
        job.completed_at = Some(Utc::now());
        Ok(())
    }

    async fn fail(&self, task_id: &TaskId, error: String) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(task_id)
            .ok_or_else(|| StoreError::UnknownTask(task_id.to_string()))?;

        guard_not_terminal(job)?;
        job.status = JobStatus::Failed;
        job.error = Some(error);
        job.completed_at = Some(Utc::now());
        Ok(())
    }

    async fn get(&self, task_id: &TaskId) -> Result<Option<Job>, StoreError> {
        Ok(self.jobs.read().await.get(task_id).cloned())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.jobs.read().await.len())
    }
}

fn guard_not_terminal(job: &Job) -> Result<(), StoreError> {
    if job.status.is_terminal() {
        return Err(StoreError::TerminalState {
            task_id: job.task_id.to_string(),
            status: job.status.to_string(),
        });
    }
    Ok(())
}
