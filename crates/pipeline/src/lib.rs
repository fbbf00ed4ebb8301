//! The roadmap pipeline — three sequential stages over a single state value.
//!
//! 1. **Retrieve** — query the resource retriever for the goal
//! 2. **Reason** — infer prerequisite ordering from goal + current skills
//! 3. **Synthesize** — produce the week-by-week timeline
//!
//! Each stage takes the prior [`PipelineState`] by value and returns an
//! updated copy; the [`Orchestrator`] owns sequencing. A stage failure aborts
//! the pipeline and propagates to the caller.

pub mod orchestrator;
pub mod reasoner;
pub mod state;
pub mod synthesizer;

pub use orchestrator::Orchestrator;
pub use reasoner::reason;
pub use state::{PipelineStage, PipelineState};
pub use synthesizer::synthesize;
