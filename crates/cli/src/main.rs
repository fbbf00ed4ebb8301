//! Pathcraft CLI — the main entry point.
//!
//! Commands:
//! - `serve`    — Start the HTTP gateway and worker pool
//! - `generate` — Run the pipeline once in-process and print the roadmap

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "pathcraft",
    about = "Pathcraft — asynchronous learning-roadmap generation",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server and worker pool
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a roadmap synchronously and print it as JSON
    Generate {
        /// The learning goal
        #[arg(short, long)]
        goal: String,

        /// Plan duration in weeks
        #[arg(short = 'w', long, default_value_t = 4)]
        weeks: u32,

        /// Weekly study hours
        #[arg(long, default_value_t = 10)]
        hours: u32,

        /// Skills the learner already has (repeatable)
        #[arg(short, long)]
        skill: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Generate {
            goal,
            weeks,
            hours,
            skill,
        } => commands::generate::run(goal, weeks, hours, skill).await?,
    }

    Ok(())
}
