//! End-to-end integration tests for the Pathcraft roadmap service.
//!
//! These tests exercise the full path from submission to polled result:
//! queue → worker pool → pipeline → job store, using the deterministic
//! catalog retriever.

use std::sync::Arc;
use std::time::Duration;

use pathcraft_core::error::{Error, RetrievalError};
use pathcraft_core::event::EventBus;
use pathcraft_core::job::{Job, JobStatus, TaskId};
use pathcraft_core::request::RoadmapRequest;
use pathcraft_core::roadmap::Resource;
use pathcraft_core::Retriever;
use pathcraft_pipeline::Orchestrator;
use pathcraft_queue::{InMemoryJobStore, JobQueue, JobStore};
use pathcraft_retrieval::CatalogRetriever;

// ── Helpers ──────────────────────────────────────────────────────────────

fn catalog_queue() -> JobQueue {
    JobQueue::new(
        Arc::new(InMemoryJobStore::new()),
        Arc::new(Orchestrator::new(Arc::new(CatalogRetriever::new()))),
        Arc::new(EventBus::default()),
    )
}

fn request(goal: &str, skills: &[&str], weeks: u32) -> RoadmapRequest {
    RoadmapRequest {
        goal: goal.into(),
        current_skills: skills.iter().map(|s| s.to_string()).collect(),
        weekly_hours: 10,
        duration_weeks: weeks,
    }
}

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

struct OfflineRetriever;

#[async_trait::async_trait]
impl Retriever for OfflineRetriever {
    fn name(&self) -> &str {
        "offline"
    }

    async fn retrieve(&self, _goal: &str) -> Result<Vec<Resource>, RetrievalError> {
        Err(RetrievalError::IndexUnavailable("connection refused".into()))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn full_roadmap_flow_for_react_learner() {
    let queue = catalog_queue();
    let _workers = queue.spawn_workers(2);

    let id = queue
        .submit(request("Learn React", &["HTML", "CSS"], 4))
        .await
        .unwrap();

    let job = await_terminal(&queue.store(), &id).await;
    assert_eq!(job.status, JobStatus::Succeeded);

    let result = job.result.unwrap();
    assert_eq!(result.total_weeks, 4);
    assert_eq!(result.roadmap.len(), 4);

    // Week numbers are exactly 1..=4, strictly increasing
    let numbers: Vec<u32> = result.roadmap.iter().map(|w| w.week_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);

    // The reasoner saw HTML/CSS but no JavaScript
    assert_eq!(
        result.roadmap[0].why_first.as_deref(),
        Some("Learn JavaScript basics - React is a JavaScript library")
    );

    // Catalog resources flow into the first week
    assert!(result.roadmap[0].resources[0].starts_with("React Documentation:"));

    // The last week is always the capstone
    assert_eq!(result.roadmap[3].topic, "Final Project & Review");
}

#[tokio::test]
async fn every_duration_satisfies_the_length_invariant() {
    let queue = catalog_queue();
    let _workers = queue.spawn_workers(4);

    for weeks in [1, 2, 3, 5, 13, 52] {
        let id = queue.submit(request("Learn Rust", &[], weeks)).await.unwrap();
        let job = await_terminal(&queue.store(), &id).await;

        let result = job.result.unwrap();
        assert_eq!(result.total_weeks, weeks);
        let numbers: Vec<u32> = result.roadmap.iter().map(|w| w.week_number).collect();
        assert_eq!(numbers, (1..=weeks).collect::<Vec<u32>>());
    }
}

#[tokio::test]
async fn one_week_plan_is_foundations_not_capstone() {
    let queue = catalog_queue();
    let _workers = queue.spawn_workers(1);

    let id = queue.submit(request("Learn Go!", &[], 1)).await.unwrap();
    let job = await_terminal(&queue.store(), &id).await;

    let result = job.result.unwrap();
    assert_eq!(result.roadmap.len(), 1);
    assert_eq!(result.roadmap[0].topic, "Foundations & Setup");
}

#[tokio::test]
async fn rejected_submission_never_becomes_a_job() {
    let queue = catalog_queue();
    let _workers = queue.spawn_workers(1);

    for bad in [
        request("", &[], 4),
        request("  ", &[], 4),
        request("Learn Rust", &[], 0),
        request("Learn Rust", &[], 53),
    ] {
        let result = queue.submit(bad).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
    assert_eq!(queue.store().count().await.unwrap(), 0);
}

#[tokio::test]
async fn retrieval_outage_fails_the_job_with_a_stable_error() {
    let queue = JobQueue::new(
        Arc::new(InMemoryJobStore::new()),
        Arc::new(Orchestrator::new(Arc::new(OfflineRetriever))),
        Arc::new(EventBus::default()),
    );
    let _workers = queue.spawn_workers(1);

    let id = queue.submit(request("Learn Rust", &[], 4)).await.unwrap();
    let job = await_terminal(&queue.store(), &id).await;

    assert_eq!(job.status, JobStatus::Failed);
    let error = job.error.unwrap();
    assert!(error.contains("connection refused"));

    // Polling again returns the same stored error
    let again = queue.store().get(&id).await.unwrap().unwrap();
    assert_eq!(again.error.unwrap(), error);
}

#[tokio::test]
async fn unknown_task_is_distinct_from_pending() {
    let queue = catalog_queue();

    let unknown = TaskId::from("never-submitted");
    assert!(queue.store().get(&unknown).await.unwrap().is_none());

    let id = queue.submit(request("Learn Rust", &[], 2)).await.unwrap();
    let job = queue.store().get(&id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Pending);
}
