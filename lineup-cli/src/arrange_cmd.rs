//! Arrange command - apply availability and tidy a game's lineup
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: mark_unavailable(), arrange_game()
//! - Level 3: resolve_jersey()
//! - Level 4: (delegated to Team)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lineup_core::{load_team, save_team, Availability, EngineConfig, GameNumber, PlayerId, Team};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ArrangeArgs {
    /// Team bundle JSON file (updated in place)
    #[arg(long, value_name = "FILE")]
    pub bundle: PathBuf,

    /// Game to arrange
    #[arg(long)]
    pub game: GameNumber,

    /// Jersey numbers of players who cannot play this game
    #[arg(long, value_delimiter = ',')]
    pub out: Vec<u32>,

    /// Write the result here instead of over the input bundle
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run arrange command
///
/// This function reads like a table of contents:
/// 1. Load the bundle
/// 2. Mark the listed players unavailable
/// 3. Auto-arrange batting and mark OUT in the fielding rotation
/// 4. Save
pub fn run(args: ArrangeArgs) -> Result<()> {
    let (mut team, _) = load_team(&args.bundle, &EngineConfig::default())?;

    mark_unavailable(&mut team, args.game, &args.out)?;

    arrange_game(&mut team, args.game)?;

    let output = args.output.as_ref().unwrap_or(&args.bundle);
    save_team(&team, output)?;
    println!("Game {} arranged and saved to {}", args.game, output.display());
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Clears only the available flag; catcher certification is kept
pub(crate) fn mark_unavailable(team: &mut Team, game: GameNumber, jerseys: &[u32]) -> Result<()> {
    for &jersey in jerseys {
        let player = resolve_jersey(team, jersey)?;
        let current = team.availability_for(game).get(player);
        let change = team.set_availability(
            game,
            player,
            Availability {
                available: false,
                ..current
            },
        )?;
        if change.became_unavailable() {
            tracing::info!("Game {}: #{} marked unavailable", game, jersey);
        }
    }
    Ok(())
}

/// Available batters first, unavailable players OUT in every inning
pub(crate) fn arrange_game(team: &mut Team, game: GameNumber) -> Result<()> {
    let order = team.auto_arrange_batting(game)?.clone();
    tracing::debug!("Game {}: batting order {:?}", game, order.as_slice());

    if team.auto_out_unavailable(game)? {
        tracing::info!("Game {}: fielding rotation updated", game);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn resolve_jersey(team: &Team, jersey: u32) -> Result<PlayerId> {
    team.roster()
        .by_jersey(jersey)
        .map(|p| p.id)
        .with_context(|| format!("No player wears #{}", jersey))
}

// ============================================================================
// TESTS
// ============================================================================
