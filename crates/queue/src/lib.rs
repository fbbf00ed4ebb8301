//! Job queue, worker pool, and job store.
//!
//! Submission creates a `Pending` job, pushes it onto an in-process channel,
//! and returns the task id immediately. A pool of workers pulls jobs off the
//! channel, runs the pipeline, and writes exactly one terminal status per job
//! to the store. The store is the single source of truth read by polling.

pub mod store;
pub mod worker;

pub use store::{InMemoryJobStore, JobStore};
pub use worker::JobQueue;
