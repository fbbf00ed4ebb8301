//! HTTP API gateway for Pathcraft.
//!
//! Endpoints:
//!
//! - `GET  /health`            — Health check
//! - `POST /generate-roadmap`  — Submit a roadmap request, get a task id
//! - `GET  /tasks/{task_id}`   — Poll job status
//! - `GET  /events`            — SSE stream of job-lifecycle events
//!
//! Built on Axum. Submission returns 202 immediately; the pipeline runs on
//! the worker pool and pollers read the job store.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event as SseEvent, Sse},
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;
use tower_http::cors::CorsLayer;
use tracing::info;

use pathcraft_core::error::Error;
use pathcraft_core::event::EventBus;
use pathcraft_core::job::{Job, JobStatus, TaskId};
use pathcraft_core::request::RoadmapRequest;
use pathcraft_core::roadmap::RoadmapResult;
use pathcraft_pipeline::Orchestrator;
use pathcraft_queue::{InMemoryJobStore, JobQueue, JobStore};

// ── State ─────────────────────────────────────────────────────────────────

/// Maximum request body size. Roadmap requests are tiny; anything larger is
/// not a legitimate submission.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared state for the API.
pub struct ApiState {
    pub queue: JobQueue,
    pub store: Arc<dyn JobStore>,
    pub events: Arc<EventBus>,
}

pub type SharedApiState = Arc<ApiState>;

// ── Router ────────────────────────────────────────────────────────────────

/// Build the API router.
pub fn build_router(state: SharedApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/generate-roadmap", post(generate_roadmap_handler))
        .route("/tasks/{task_id}", get(task_status_handler))
        .route("/events", get(event_stream_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the full application state from configuration and start serving.
pub async fn start(config: pathcraft_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let retriever = pathcraft_retrieval::build_from_config(&config);
    let store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::with_capacity(config.queue.max_jobs));
    let events = Arc::new(EventBus::default());
    let queue = JobQueue::new(
        store.clone(),
        Arc::new(Orchestrator::new(retriever)),
        events.clone(),
    );

    let workers = queue.spawn_workers(config.queue.workers);
    info!(workers = workers.len(), "Worker pool started");

    let state = Arc::new(ApiState {
        queue,
        store,
        events,
    });
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct SubmitResponse {
    task_id: String,
    status: String,
}

#[derive(Serialize, Deserialize)]
struct TaskStatusResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<RoadmapResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TaskStatusResponse {
    fn from_job(job: Job) -> Self {
        match job.status {
            // Pending and Running both read as "processing" to pollers;
            // the distinction is internal to the store.
            JobStatus::Pending | JobStatus::Running => Self {
                status: "processing".into(),
                result: None,
                error: None,
            },
            JobStatus::Succeeded => Self {
                status: "completed".into(),
                result: job.result,
                error: None,
            },
            JobStatus::Failed => Self {
                status: "failed".into(),
                result: None,
                error: job.error,
            },
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /generate-roadmap` — validate and enqueue, return the task handle.
async fn generate_roadmap_handler(
    State(state): State<SharedApiState>,
    Json(payload): Json<RoadmapRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), (StatusCode, Json<ErrorResponse>)> {
    info!(goal = %payload.goal, duration_weeks = payload.duration_weeks, "Roadmap submission");

    match state.queue.submit(payload).await {
        Ok(task_id) => Ok((
            StatusCode::ACCEPTED,
            Json(SubmitResponse {
                task_id: task_id.to_string(),
                status: "processing".into(),
            }),
        )),
        Err(Error::Validation(e)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// `GET /tasks/{task_id}` — read-only, idempotent status poll.
async fn task_status_handler(
    State(state): State<SharedApiState>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskStatusResponse>, (StatusCode, Json<ErrorResponse>)> {
    let id = TaskId::from(task_id.as_str());

    match state.store.get(&id).await {
        Ok(Some(job)) => Ok(Json(TaskStatusResponse::from_job(job))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Unknown task: {task_id}"),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// `GET /events` — SSE stream of job-lifecycle domain events.
async fn event_stream_handler(
    State(state): State<SharedApiState>,
) -> Sse<impl futures::Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = state.events.subscribe();
    let stream = tokio_stream::wrappers::BroadcastStream::new(rx)
        .filter_map(|result| result.ok())
        .map(|event| {
            let data = serde_json::to_string(event.as_ref()).unwrap_or_default();
            Ok(SseEvent::default().event(event.name()).data(data))
        });

    Sse::new(stream)
}

// ── Tests ─────────────────────────────────────────────────────────────────
