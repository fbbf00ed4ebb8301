//! Job queue and worker pool.
//!
//! `submit` validates the request, records a `Pending` job, pushes it onto an
//! unbounded channel, and returns the task id without waiting on pipeline
//! execution. Workers share the channel receiver behind a mutex, so each job
//! is dequeued exactly once; within a worker, processing is strictly
//! sequential. No cross-worker ordering is guaranteed.
//!
//! Any error raised inside a stage is caught at the worker boundary and
//! recorded as a `Failed` status — the worker loop itself never dies on a
//! job failure.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use pathcraft_core::error::{Error, Result};
use pathcraft_core::event::{DomainEvent, EventBus};
use pathcraft_core::job::{Job, TaskId};
use pathcraft_core::request::RoadmapRequest;
use pathcraft_pipeline::Orchestrator;

use crate::store::JobStore;

/// A job as it travels through the channel: the id plus the immutable request.
struct QueuedJob {
    task_id: TaskId,
    request: RoadmapRequest,
}

/// The job queue: submission endpoint plus worker pool.
pub struct JobQueue {
    store: Arc<dyn JobStore>,
    orchestrator: Arc<Orchestrator>,
    events: Arc<EventBus>,
    tx: mpsc::UnboundedSender<QueuedJob>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<QueuedJob>>>,
}

impl JobQueue {
    pub fn new(
        store: Arc<dyn JobStore>,
        orchestrator: Arc<Orchestrator>,
        events: Arc<EventBus>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            store,
            orchestrator,
            events,
            tx,
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Submit a request for asynchronous processing.
    ///
    /// Returns the task id immediately; the pipeline runs later on a worker.
    /// A request that fails validation is rejected here and no job record is
    /// created.
    pub async fn submit(&self, request: RoadmapRequest) -> Result<TaskId> {
        request.validate()?;

        let task_id = TaskId::new();
        let job = Job::pending(task_id.clone(), request.clone());
        self.store.insert(job).await?;

        self.tx
            .send(QueuedJob {
                task_id: task_id.clone(),
                request: request.clone(),
            })
            .map_err(|_| Error::Internal("job channel closed".into()))?;

        self.events.publish(DomainEvent::JobSubmitted {
            task_id: task_id.clone(),
            goal: request.goal.clone(),
            timestamp: Utc::now(),
        });
        info!(task_id = %task_id, goal = %request.goal, "Job submitted");

        Ok(task_id)
    }

    /// Spawn `count` workers pulling from the shared queue.
    ///
    /// Each worker runs until the submission side is dropped.
    pub fn spawn_workers(&self, count: usize) -> Vec<JoinHandle<()>> {
        (0..count)
            .map(|worker| {
                let store = self.store.clone();
                let orchestrator = self.orchestrator.clone();
                let events = self.events.clone();
                let rx = self.rx.clone();

                tokio::spawn(async move {
                    info!(worker, "Worker started");
                    loop {
                        // Hold the receiver lock only for the dequeue itself,
                        // so other workers can pull while this one processes.
                        let job = { rx.lock().await.recv().await };
                        let Some(job) = job else {
                            debug!(worker, "Job channel closed, worker stopping");
                            break;
                        };
                        process_job(worker, job, &store, &orchestrator, &events).await;
                    }
                })
            })
            .collect()
    }

    /// The store this queue writes to.
    pub fn store(&self) -> Arc<dyn JobStore> {
        self.store.clone()
    }
}

/// Run one job to a terminal status. Never propagates errors — every failure
/// path ends in a `Failed` record or a logged store inconsistency.
async fn process_job(
    worker: usize,
    job: QueuedJob,
    store: &Arc<dyn JobStore>,
    orchestrator: &Arc<Orchestrator>,
    events: &Arc<EventBus>,
) {
    let QueuedJob { task_id, request } = job;

    if let Err(e) = store.mark_running(&task_id).await {
        // The job vanished or was already resolved; nothing to run.
        warn!(worker, task_id = %task_id, error = %e, "Could not claim job, skipping");
        return;
    }
    events.publish(DomainEvent::JobStarted {
        task_id: task_id.clone(),
        worker,
        timestamp: Utc::now(),
    });
    info!(worker, task_id = %task_id, goal = %request.goal, "Job started");

    match orchestrator.run(&request).await {
        Ok(state) => {
            let result = state.into_result();
            let total_weeks = result.total_weeks;
            match store.complete(&task_id, result).await {
                Ok(()) => {
                    events.publish(DomainEvent::JobSucceeded {
                        task_id: task_id.clone(),
                        total_weeks,
                        timestamp: Utc::now(),
                    });
                    info!(worker, task_id = %task_id, total_weeks, "Job succeeded");
                }
                Err(e) => {
                    warn!(worker, task_id = %task_id, error = %e, "Could not store result");
                }
            }
        }
        Err(e) => {
            let message = e.to_string();
            if let Err(store_err) = store.fail(&task_id, message.clone()).await {
                warn!(worker, task_id = %task_id, error = %store_err, "Could not store failure");
            }
            events.publish(DomainEvent::JobFailed {
                task_id: task_id.clone(),
                error: message.clone(),
                timestamp: Utc::now(),
            });
            warn!(worker, task_id = %task_id, error = %message, "Job failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pathcraft_core::error::RetrievalError;
    use pathcraft_core::job::JobStatus;
    use pathcraft_core::roadmap::Resource;
    use pathcraft_core::Retriever;
    use pathcraft_retrieval::CatalogRetriever;
    use std::time::Duration;

    use crate::store::InMemoryJobStore;

    struct FailingRetriever;

    #[async_trait]
    impl Retriever for FailingRetriever {
        fn name(&self) -> &str {
            "failing"
        }

        async fn retrieve(&self, _goal: &str) -> std::result::Result<Vec<Resource>, RetrievalError> {
            Err(RetrievalError::QueryFailed("boom".into()))
        }
    }

    fn queue_with(retriever: Arc<dyn Retriever>) -> JobQueue {
        JobQueue::new(
            Arc::new(InMemoryJobStore::new()),
            Arc::new(Orchestrator::new(retriever)),
            Arc::new(EventBus::default()),
        )
    }

    fn request(goal: &str, weeks: u32) -> RoadmapRequest {
        RoadmapRequest {
            goal: goal.into(),
            current_skills: vec!["HTML".into(), "CSS".into()],
            weekly_hours: 10,
            duration_weeks: weeks,
        }
    }

    /// Poll the store until the job reaches a terminal status.
    async fn await_terminal(store: &Arc<dyn JobStore>, task_id: &TaskId) -> Job {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if let Some(job) = store.get(task_id).await.unwrap() {
                    if job.status.is_terminal() {
                        return job;
                    }
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("job did not reach a terminal status in time")
    }

    #[tokio::test]
    async fn submit_returns_immediately_without_workers() {
        let queue = queue_with(Arc::new(CatalogRetriever::new()));

        let id = queue.submit(request("Learn Rust", 4)).await.unwrap();

        // No worker is running, so the job stays Pending
        let job = queue.store().get(&id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Pending);
    }

    #[tokio::test]
    async fn invalid_request_creates_no_job() {
        let queue = queue_with(Arc::new(CatalogRetriever::new()));

        let result = queue.submit(request("  ", 4)).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(queue.store().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn job_runs_to_succeeded() {
        let queue = queue_with(Arc::new(CatalogRetriever::new()));
        let _workers = queue.spawn_workers(1);

        let id = queue.submit(request("Learn React", 4)).await.unwrap();
        let job = await_terminal(&queue.store(), &id).await;

        assert_eq!(job.status, JobStatus::Succeeded);
        let result = job.result.unwrap();
        assert_eq!(result.total_weeks, 4);
        assert_eq!(result.roadmap.len(), 4);
        let numbers: Vec<u32> = result.roadmap.iter().map(|w| w.week_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn stage_failure_marks_job_failed_and_worker_survives() {
        let queue = queue_with(Arc::new(FailingRetriever));
        let _workers = queue.spawn_workers(1);

        let first = queue.submit(request("Learn Rust", 4)).await.unwrap();
        let job = await_terminal(&queue.store(), &first).await;
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error.unwrap().contains("boom"));

        // The same worker must still process the next job
        let second = queue.submit(request("Learn Go", 2)).await.unwrap();
        let job = await_terminal(&queue.store(), &second).await;
        assert_eq!(job.status, JobStatus::Failed);
    }

    #[tokio::test]
    async fn concurrent_submissions_all_reach_terminal_states() {
        let queue = Arc::new(queue_with(Arc::new(CatalogRetriever::new())));
        let _workers = queue.spawn_workers(4);

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let queue = queue.clone();
                tokio::spawn(
                    async move { queue.submit(request(&format!("Learn topic {i}"), 3)).await },
                )
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }

        // All ids are distinct
        let unique: std::collections::HashSet<_> = ids.iter().map(|id| id.to_string()).collect();
        assert_eq!(unique.len(), ids.len());

        for id in &ids {
            let job = await_terminal(&queue.store(), id).await;
            assert_eq!(job.status, JobStatus::Succeeded);
        }
    }

    #[tokio::test]
    async fn lifecycle_events_are_published() {
        let events = Arc::new(EventBus::default());
        let queue = JobQueue::new(
            Arc::new(InMemoryJobStore::new()),
            Arc::new(Orchestrator::new(Arc::new(CatalogRetriever::new()))),
            events.clone(),
        );
        let mut rx = events.subscribe();
        let _workers = queue.spawn_workers(1);

        let _id = queue.submit(request("Learn Python", 2)).await.unwrap();

        let mut names = Vec::new();
        for _ in 0..3 {
            let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("timed out waiting for event")
                .unwrap();
            names.push(event.name());
        }
        assert_eq!(names, vec!["job_submitted", "job_started", "job_succeeded"]);
    }
}
