//! Lineup CLI - Command-line interface
//!
//! Commands:
//! - example: Generate a seeded example team bundle
//! - roster: Import, export or template the roster CSV
//! - validate: Report batting and fielding issues
//! - arrange: Auto-arrange batting and mark unavailable players OUT
//! - fairness: Batting and fielding distribution across games
//! - plan: Print the lineup sheet for one game
//! - serve: Start the HTTP API

mod arrange_cmd;
mod example_cmd;
mod fairness_cmd;
mod plan_cmd;
mod roster_cmd;
mod server;
mod validate_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lineup")]
#[command(about = "Batting order and fielding rotation planner")]
struct Cli {
    /// Seed for reproducible example data
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an example team bundle
    Example(example_cmd::ExampleArgs),
    /// Roster CSV import, export and template
    Roster(roster_cmd::RosterArgs),
    /// Validate batting orders and fielding rotations
    Validate(validate_cmd::ValidateArgs),
    /// Auto-arrange a game's batting order and fielding OUTs
    Arrange(arrange_cmd::ArrangeArgs),
    /// Batting and fielding fairness reports
    Fairness(fairness_cmd::FairnessArgs),
    /// Print the lineup sheet for a game
    Plan(plan_cmd::PlanArgs),
    /// Start the HTTP API server
    Serve(server::ServerArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Example(args) => example_cmd::run(args, cli.seed),
        Commands::Roster(args) => roster_cmd::run(args),
        Commands::Validate(args) => validate_cmd::run(args),
        Commands::Arrange(args) => arrange_cmd::run(args),
        Commands::Fairness(args) => fairness_cmd::run(args),
        Commands::Plan(args) => plan_cmd::run(args),
        Commands::Serve(args) => server::run(args),
    }
}
