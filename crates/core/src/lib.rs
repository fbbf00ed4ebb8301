//! # Pathcraft Core
//!
//! Domain types, traits, and error definitions for the Pathcraft roadmap
//! service. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem boundary is defined as a trait here. Implementations live
//! in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod event;
pub mod job;
pub mod request;
pub mod retriever;
pub mod roadmap;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result, RetrievalError, StoreError, ValidationError};
pub use event::{DomainEvent, EventBus};
pub use job::{Job, JobStatus, TaskId};
pub use request::RoadmapRequest;
pub use retriever::Retriever;
pub use roadmap::{Resource, RoadmapResult, WeekPlan};
