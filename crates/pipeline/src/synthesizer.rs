//! Timeline synthesizer — turns retrieved resources and prerequisite
//! justifications into the week-by-week plan.
//!
//! Branches are evaluated in strict priority order per week and the first
//! match wins: week 1, then week 2 (only in plans longer than two weeks),
//! then the final week, then the advanced-topics default. A one-week plan
//! therefore gets only the week-1 branch — the final-week branch must not
//! fire for it as well.

use std::collections::HashMap;

use pathcraft_core::roadmap::{Resource, WeekPlan};

use crate::reasoner::{WEEK_1, WEEK_2};

/// Produce exactly `duration` week plans, week numbers `1..=duration`.
pub fn synthesize(
    duration: u32,
    resources: &[Resource],
    prerequisites: &HashMap<String, String>,
    goal: &str,
) -> Vec<WeekPlan> {
    let formatted: Vec<String> = resources.iter().map(Resource::formatted).collect();

    (1..=duration)
        .map(|week| plan_week(week, duration, &formatted, prerequisites, goal))
        .collect()
}

fn plan_week(
    week: u32,
    duration: u32,
    formatted: &[String],
    prerequisites: &HashMap<String, String>,
    goal: &str,
) -> WeekPlan {
    if week == 1 {
        let why_first = prerequisites.get(WEEK_1).cloned().unwrap_or_else(|| {
            "Establishing a strong foundation is crucial before advancing.".to_string()
        });
        let week_resources = if formatted.is_empty() {
            vec!["Getting Started Guide".to_string()]
        } else {
            formatted.iter().take(2).cloned().collect()
        };
        WeekPlan {
            week_number: week,
            topic: "Foundations & Setup".to_string(),
            description: format!("Setting up the environment for {goal} and learning core concepts."),
            resources: week_resources,
            why_first: Some(why_first),
        }
    } else if week == 2 && duration > 2 {
        let why_first = prerequisites
            .get(WEEK_2)
            .cloned()
            .unwrap_or_else(|| "Building on the foundation with practical knowledge.".to_string());
        let week_resources = if formatted.len() > 2 {
            formatted[2..formatted.len().min(4)].to_vec()
        } else {
            vec!["Core Documentation".to_string(), "Practice Exercises".to_string()]
        };
        WeekPlan {
            week_number: week,
            topic: "Core Concepts".to_string(),
            description: format!("Deep dive into the essential concepts of {goal}."),
            resources: week_resources,
            why_first: Some(why_first),
        }
    } else if week == duration {
        WeekPlan {
            week_number: week,
            topic: "Final Project & Review".to_string(),
            description: format!("Building a capstone project to demonstrate {goal} mastery."),
            resources: vec![
                "Project Guide".to_string(),
                "Deployment Checklist".to_string(),
                "Best Practices".to_string(),
            ],
            why_first: Some(
                "Applying knowledge through a real project solidifies learning and builds portfolio."
                    .to_string(),
            ),
        }
    } else {
        let week_resources = if formatted.is_empty() {
            vec!["Advanced Tutorial".to_string(), "Case Studies".to_string()]
        } else {
            formatted[formatted.len().saturating_sub(2)..].to_vec()
        };
        WeekPlan {
            week_number: week,
            topic: format!("Advanced Topics (Week {week})"),
            description: format!("Exploring advanced features and patterns in {goal}."),
            resources: week_resources,
            why_first: Some(
                "Progressive learning - each concept builds on previous knowledge.".to_string(),
            ),
        }
    }
}
