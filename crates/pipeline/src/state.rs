//! Pipeline state — the record threaded through the three stages.

use std::collections::HashMap;

use pathcraft_core::request::RoadmapRequest;
use pathcraft_core::roadmap::{Resource, RoadmapResult, WeekPlan};

/// Progress marker for the pipeline. Transitions are strictly sequential:
/// `Created → ResourcesRetrieved → PrerequisitesReasoned → TimelineGenerated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Created,
    ResourcesRetrieved,
    PrerequisitesReasoned,
    TimelineGenerated,
}

impl PipelineStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::TimelineGenerated)
    }
}

/// The state record threaded through the stages.
///
/// Each stage reads prior fields and writes exactly the fields it owns:
/// retrieve → `retrieved_resources`, reason → `prerequisites`,
/// synthesize → `roadmap`. Stages take the state by value and return an
/// updated copy, so no two stages ever share mutable state.
#[derive(Debug, Clone)]
pub struct PipelineState {
    pub goal: String,
    pub current_skills: Vec<String>,
    pub duration_weeks: u32,
    pub retrieved_resources: Vec<Resource>,
    pub prerequisites: HashMap<String, String>,
    pub roadmap: Vec<WeekPlan>,
    pub stage: PipelineStage,
}

impl PipelineState {
    /// Initial state for a request, before any stage has run.
    pub fn new(request: &RoadmapRequest) -> Self {
        Self {
            goal: request.goal.clone(),
            current_skills: request.current_skills.clone(),
            duration_weeks: request.duration_weeks,
            retrieved_resources: Vec::new(),
            prerequisites: HashMap::new(),
            roadmap: Vec::new(),
            stage: PipelineStage::Created,
        }
    }

    /// Convert a terminal state into the result stored against the job.
    pub fn into_result(self) -> RoadmapResult {
        RoadmapResult {
            roadmap: self.roadmap,
            total_weeks: self.duration_weeks,
        }
    }
}
