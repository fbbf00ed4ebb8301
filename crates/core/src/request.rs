//! The roadmap request — the immutable input to a generation job.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minimum goal length after trimming.
pub const MIN_GOAL_LEN: usize = 3;
/// Inclusive bounds for weekly study hours.
pub const WEEKLY_HOURS_RANGE: std::ops::RangeInclusive<u32> = 1..=168;
/// Inclusive bounds for plan duration.
pub const DURATION_WEEKS_RANGE: std::ops::RangeInclusive<u32> = 1..=52;

/// A request to generate a learning roadmap.
///
/// Immutable once submitted — the worker only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapRequest {
    /// The learning goal (e.g. "Learn React")
    pub goal: String,

    /// Skills the learner already has
    #[serde(default)]
    pub current_skills: Vec<String>,

    /// Hours per week the learner can commit (1-168)
    pub weekly_hours: u32,

    /// Total plan length in weeks (1-52)
    pub duration_weeks: u32,
}

impl RoadmapRequest {
    /// Check all submission bounds. Called before a job is created, so a
    /// rejected request never receives a task id.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let goal = self.goal.trim();
        if goal.is_empty() {
            return Err(ValidationError::GoalEmpty);
        }
        if goal.len() < MIN_GOAL_LEN {
            return Err(ValidationError::GoalTooShort {
                length: goal.len(),
                minimum: MIN_GOAL_LEN,
            });
        }
        if !WEEKLY_HOURS_RANGE.contains(&self.weekly_hours) {
            return Err(ValidationError::WeeklyHoursOutOfRange {
                hours: self.weekly_hours as i64,
            });
        }
        if !DURATION_WEEKS_RANGE.contains(&self.duration_weeks) {
            return Err(ValidationError::DurationOutOfRange {
                weeks: self.duration_weeks as i64,
            });
        }
        Ok(())
    }
}
