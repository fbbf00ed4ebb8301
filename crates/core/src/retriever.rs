//! Retriever trait — the resource-retrieval collaborator.
//!
//! The pipeline only depends on this contract: given a goal string, return an
//! ordered list of resource descriptors. Implementations may be a
//! deterministic catalog, a vector index, or anything else that satisfies the
//! contract. A retriever failure marks the owning job as failed.

use async_trait::async_trait;

use crate::error::RetrievalError;
use crate::roadmap::Resource;

/// The resource-retrieval seam.
///
/// Implementations: catalog (deterministic keyword lookup), plus test stubs.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// The retriever name (e.g. "catalog").
    fn name(&self) -> &str;

    /// Retrieve resources relevant to the goal, most relevant first.
    async fn retrieve(&self, goal: &str) -> Result<Vec<Resource>, RetrievalError>;
}
