//! Resource retriever implementations.
//!
//! The pipeline consumes the [`Retriever`] trait from `pathcraft-core`; this
//! crate provides the concrete backends and a config-driven constructor.
//! The default backend is a deterministic keyword catalog — no index, no
//! embeddings, same contract.

pub mod catalog;

pub use catalog::CatalogRetriever;

use std::sync::Arc;

use pathcraft_core::Retriever;

/// Build the retriever selected by configuration.
pub fn build_from_config(config: &pathcraft_config::AppConfig) -> Arc<dyn Retriever> {
    match config.retrieval.mode.as_str() {
        "catalog" => Arc::new(CatalogRetriever::new()),
        other => {
            // Config validation rejects unknown modes at startup; this is the
            // fallback for callers that skipped validation.
            tracing::warn!(mode = %other, "Unknown retrieval mode, falling back to catalog");
            Arc::new(CatalogRetriever::new())
        }
    }
}
