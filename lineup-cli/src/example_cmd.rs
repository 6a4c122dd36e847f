//! Example command - write a seeded demo season to a bundle
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: generate_team(), report_summary()
//! - Level 3: (delegated to lineup_core::example)
//! - Level 4: RNG creation

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lineup_core::example::example_team;
use lineup_core::{save_team, EngineConfig, Team};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ExampleArgs {
    /// Number of games to schedule
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Innings per game
    #[arg(long, default_value = "6")]
    pub innings: u32,

    /// Bundle file to write
    #[arg(long, short, value_name = "FILE", default_value = "team.json")]
    pub output: PathBuf,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run example command
///
/// This function reads like a table of contents:
/// 1. Generate the team from the seed
/// 2. Save it as a bundle
/// 3. Report what was written
pub fn run(args: ExampleArgs, seed: Option<u64>) -> Result<()> {
    let team = generate_team(&args, seed)?;

    save_team(&team, &args.output)?;

    report_summary(&team, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Build the example season
pub(crate) fn generate_team(args: &ExampleArgs, seed: Option<u64>) -> Result<Team> {
    let config = EngineConfig::default().with_default_innings(args.innings);
    let mut rng = create_rng(seed);
    example_team(&mut rng, &config, args.games).context("Failed to generate example team")
}

fn report_summary(team: &Team, args: &ExampleArgs) {
    println!(
        "Wrote {} players and {} games to {}",
        team.roster().len(),
        team.schedule().len(),
        args.output.display()
    );
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
