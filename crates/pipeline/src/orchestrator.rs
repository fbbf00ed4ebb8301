//! Pipeline orchestrator — sequences the three stages over one state value.
//!
//! # Flow
//!
//! ```text
//! RoadmapRequest
//!       │
//!       ▼
//! ┌────────────┐   ┌────────────┐   ┌─────────────┐
//! │  retrieve   │ → │   reason    │ → │  synthesize  │ → PipelineState (terminal)
//! └────────────┘   └────────────┘   └─────────────┘
//! ```
//!
//! Transitions are strictly sequential with no branching or loops. A stage
//! failure (the retriever erroring) aborts the run and propagates to the
//! caller, which records it against the job — no partial results are
//! returned.

use std::sync::Arc;

use tracing::{debug, info};

use pathcraft_core::error::Result;
use pathcraft_core::request::RoadmapRequest;
use pathcraft_core::Retriever;

use crate::reasoner::reason;
use crate::state::{PipelineStage, PipelineState};
use crate::synthesizer::synthesize;

/// Runs the three-stage pipeline. Holds the retriever seam; the reasoning
/// and synthesis stages are pure.
pub struct Orchestrator {
    retriever: Arc<dyn Retriever>,
}

impl Orchestrator {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }

    /// Run the full pipeline for a request, returning the terminal state.
    pub async fn run(&self, request: &RoadmapRequest) -> Result<PipelineState> {
        let state = PipelineState::new(request);

        let state = self.retrieve_resources(state).await?;
        let state = reason_prerequisites(state);
        let state = generate_timeline(state);

        debug_assert!(state.stage.is_terminal());
        info!(
            goal = %state.goal,
            weeks = state.roadmap.len(),
            "Pipeline complete"
        );
        Ok(state)
    }

    /// Stage 1: query the retriever for the goal.
    async fn retrieve_resources(&self, mut state: PipelineState) -> Result<PipelineState> {
        info!(goal = %state.goal, retriever = self.retriever.name(), "Retrieving resources");
        let resources = self.retriever.retrieve(&state.goal).await?;
        debug!(count = resources.len(), "Resources retrieved");

        state.retrieved_resources = resources;
        state.stage = PipelineStage::ResourcesRetrieved;
        Ok(state)
    }
}

/// Stage 2: infer prerequisite ordering from goal + skills.
fn reason_prerequisites(mut state: PipelineState) -> PipelineState {
    debug!(goal = %state.goal, "Reasoning about prerequisites");
    state.prerequisites = reason(&state.goal, &state.current_skills);
    state.stage = PipelineStage::PrerequisitesReasoned;
    state
}

/// Stage 3: synthesize the weekly timeline.
fn generate_timeline(mut state: PipelineState) -> PipelineState {
    debug!(duration = state.duration_weeks, "Generating timeline");
    state.roadmap = synthesize(
        state.duration_weeks,
        &state.retrieved_resources,
        &state.prerequisites,
        &state.goal,
    );
    state.stage = PipelineStage::TimelineGenerated;
    state
}
