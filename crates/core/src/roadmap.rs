//! Roadmap output types — retrieved resources, week plans, and the final
//! result returned to pollers.

use serde::{Deserialize, Serialize};

/// A single retrieved learning resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource title
    pub title: String,

    /// Short content preview
    pub snippet: String,
}

impl Resource {
    pub fn new(title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
        }
    }

    /// The display form used in week listings.
    pub fn formatted(&self) -> String {
        format!("{}: {}", self.title, self.snippet)
    }
}

/// One week of the generated roadmap. Never mutated after synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    /// 1-based week index
    pub week_number: u32,

    /// The week's focus topic
    pub topic: String,

    /// What the learner does this week
    pub description: String,

    /// Formatted resource strings or placeholders
    pub resources: Vec<String>,

    /// Why this week comes at this position in the plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_first: Option<String>,
}

/// The final result stored against a succeeded job.
///
/// Invariant: `roadmap.len() == total_weeks == request.duration_weeks`, with
/// `week_number` values exactly `1..=total_weeks` in increasing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapResult {
    pub roadmap: Vec<WeekPlan>,
    pub total_weeks: u32,
}
