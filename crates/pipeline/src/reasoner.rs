//! Prerequisite reasoner — rule-based inference of learning order.
//!
//! Pure function of (goal, skills). Matching is case-insensitive substring
//! on the goal, rules evaluated in order with first match winning. The
//! output maps a position key ("week_1", "week_2") to a justification
//! string consumed by the synthesizer's `why_first` field.

use std::collections::{HashMap, HashSet};

/// Position key for the first week.
pub const WEEK_1: &str = "week_1";
/// Position key for the second week.
pub const WEEK_2: &str = "week_2";

/// Infer prerequisite justifications for the goal given the learner's
/// current skills.
pub fn reason(goal: &str, current_skills: &[String]) -> HashMap<String, String> {
    let goal_lower = goal.to_lowercase();
    let skills: HashSet<String> = current_skills.iter().map(|s| s.to_lowercase()).collect();

    let mut prerequisites = HashMap::new();

    if goal_lower.contains("react") {
        let message = if !skills.contains("html") && !skills.contains("css") {
            "Learn HTML/CSS first - React builds on web fundamentals"
        } else if !skills.contains("javascript") {
            "Learn JavaScript basics - React is a JavaScript library"
        } else {
            "Review JavaScript ES6+ features before diving into React"
        };
        prerequisites.insert(WEEK_1.to_string(), message.to_string());
    } else if goal_lower.contains("saas") || goal_lower.contains("mern") {
        if !skills.contains("javascript") {
            prerequisites.insert(
                WEEK_1.to_string(),
                "Master JavaScript fundamentals - required for full-stack development".to_string(),
            );
        } else if !skills.contains("react") {
            prerequisites.insert(
                WEEK_2.to_string(),
                "Learn React for the frontend before backend integration".to_string(),
            );
        } else {
            prerequisites.insert(
                WEEK_1.to_string(),
                "Review full-stack architecture patterns".to_string(),
            );
        }
    } else if goal_lower.contains("javascript") {
        let message = if !skills.contains("html") {
            "Learn HTML basics to understand the DOM that JavaScript manipulates"
        } else {
            "Start with ES6+ syntax and modern JavaScript features"
        };
        prerequisites.insert(WEEK_1.to_string(), message.to_string());
    } else {
        prerequisites.insert(
            WEEK_1.to_string(),
            format!("Build foundational knowledge in {goal} step by step"),
        );
    }

    prerequisites
}
