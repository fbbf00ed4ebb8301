//! `pathcraft generate` — run the pipeline once and print the roadmap.
//!
//! Uses the same orchestrator as the queued path, just without a worker pool
//! in between. Handy for smoke-testing a goal without starting a server.

use pathcraft_core::request::RoadmapRequest;
use pathcraft_pipeline::Orchestrator;

pub async fn run(
    goal: String,
    weeks: u32,
    hours: u32,
    skills: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = RoadmapRequest {
        goal,
        current_skills: skills,
        weekly_hours: hours,
        duration_weeks: weeks,
    };
    request.validate()?;

    let config = pathcraft_config::AppConfig::load()?;
    let retriever = pathcraft_retrieval::build_from_config(&config);
    let orchestrator = Orchestrator::new(retriever);

    let state = orchestrator.run(&request).await?;
    let result = state.into_result();

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
