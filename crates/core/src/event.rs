//! Domain event system — decoupled communication between bounded contexts.
//!
//! Events are published when a job changes state. Other components can
//! subscribe to react without tight coupling; the gateway exposes them as a
//! server-sent event stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::job::TaskId;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// A job was accepted and enqueued
    JobSubmitted {
        task_id: TaskId,
        goal: String,
        timestamp: DateTime<Utc>,
    },

    /// A worker claimed the job and started the pipeline
    JobStarted {
        task_id: TaskId,
        worker: usize,
        timestamp: DateTime<Utc>,
    },

    /// The pipeline completed and the result was stored
    JobSucceeded {
        task_id: TaskId,
        total_weeks: u32,
        timestamp: DateTime<Utc>,
    },

    /// A stage failed; the error was stored
    JobFailed {
        task_id: TaskId,
        error: String,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Stable event name used for SSE event types.
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::JobSubmitted { .. } => "job_submitted",
            DomainEvent::JobStarted { .. } => "job_started",
            DomainEvent::JobSucceeded { .. } => "job_succeeded",
            DomainEvent::JobFailed { .. } => "job_failed",
        }
    }
}

/// A broadcast-based event bus for domain events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub. Components
/// subscribe to receive all events and filter for what they care about.
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // Ignore send errors (no subscribers = that's fine)
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
