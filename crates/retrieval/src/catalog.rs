//! Catalog retriever — deterministic keyword lookup over a built-in
//! resource catalog.
//!
//! Matches known topic keywords against the goal (case-insensitive substring)
//! and returns that topic's curated entries; goals with no catalog match get
//! a generic entry set templated from the goal string. Pure function of the
//! goal, so results are stable across calls — useful both in production and
//! as the deterministic backend for tests.

use async_trait::async_trait;
use tracing::debug;

use pathcraft_core::error::RetrievalError;
use pathcraft_core::roadmap::Resource;
use pathcraft_core::Retriever;

/// One catalog topic: a keyword and its curated resources.
struct Topic {
    keyword: &'static str,
    entries: [(&'static str, &'static str); 3],
}

/// The built-in catalog, checked in order.
const CATALOG: &[Topic] = &[
    Topic {
        keyword: "react",
        entries: [
            (
                "React Documentation",
                "Learn React hooks, components, and state management...",
            ),
            (
                "React Tutorial",
                "Build your first React application step by step...",
            ),
            (
                "React Best Practices",
                "Modern patterns for React development...",
            ),
        ],
    },
    Topic {
        keyword: "python",
        entries: [
            (
                "Python Docs",
                "Learn Python fundamentals, OOP, and advanced topics...",
            ),
            (
                "Python Tutorial",
                "Getting started with Python programming...",
            ),
            (
                "Python Best Practices",
                "Writing clean, maintainable Python code...",
            ),
        ],
    },
    Topic {
        keyword: "javascript",
        entries: [
            (
                "JavaScript Guide",
                "Master ES6+, async/await, and modern JavaScript...",
            ),
            (
                "JavaScript Tutorial",
                "Learn JavaScript from basics to advanced...",
            ),
            ("JavaScript Patterns", "Design patterns in JavaScript..."),
        ],
    },
];

/// Deterministic catalog-backed retriever.
pub struct CatalogRetriever;

impl CatalogRetriever {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CatalogRetriever {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Retriever for CatalogRetriever {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn retrieve(&self, goal: &str) -> Result<Vec<Resource>, RetrievalError> {
        let goal_lower = goal.to_lowercase();

        for topic in CATALOG {
            if goal_lower.contains(topic.keyword) {
                debug!(keyword = topic.keyword, "Catalog match");
                return Ok(topic
                    .entries
                    .iter()
                    .map(|(title, snippet)| Resource::new(*title, *snippet))
                    .collect());
            }
        }

        // No catalog match: generic entries templated from the goal.
        debug!(goal = %goal, "No catalog match, using generic entries");
        Ok(vec![
            Resource::new(
                format!("Resource for {goal}"),
                format!("Learn {goal} fundamentals and best practices..."),
            ),
            Resource::new(format!("{goal} Tutorial"), format!("Getting started with {goal}...")),
            Resource::new(
                format!("{goal} Guide"),
                format!("Complete guide to mastering {goal}..."),
            ),
        ])
    }
}
