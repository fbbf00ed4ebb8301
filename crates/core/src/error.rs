//! Error types for the Pathcraft domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Pathcraft operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Request validation errors ---
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // --- Retrieval errors ---
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    // --- Job store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// A malformed or out-of-range submission. Surfaced synchronously to the
/// caller; the job is never enqueued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Goal must not be empty")]
    GoalEmpty,

    #[error("Goal too short: {length} chars (minimum {minimum})")]
    GoalTooShort { length: usize, minimum: usize },

    #[error("weekly_hours out of range: {hours} (expected 1-168)")]
    WeeklyHoursOutOfRange { hours: i64 },

    #[error("duration_weeks out of range: {weeks} (expected 1-52)")]
    DurationOutOfRange { weeks: i64 },
}

/// A collaborator failure while retrieving resources. Caught at the worker
/// boundary and recorded against the job; never retried automatically.
#[derive(Debug, Clone, Error)]
pub enum RetrievalError {
    #[error("Retrieval query failed: {0}")]
    QueryFailed(String),

    #[error("Retrieval index unavailable: {0}")]
    IndexUnavailable(String),
}

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Task {task_id} already in terminal state {status}")]
    TerminalState { task_id: String, status: String },

    #[error("Storage error: {0}")]
    Storage(String),
}
