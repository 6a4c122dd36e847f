//! Plan command - print or save the lineup sheet for one game
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: write_plan()
//! - Level 3: (delegated to GamePlan)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use lineup_core::{load_team, EngineConfig, GameNumber, GamePlan};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlanArgs {
    /// Team bundle JSON file
    #[arg(long, value_name = "FILE")]
    pub bundle: PathBuf,

    /// Game to print
    #[arg(long)]
    pub game: GameNumber,

    /// Write the sheet to a file instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output plan rows as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run plan command
///
/// This function reads like a table of contents:
/// 1. Load the bundle
/// 2. Build the plan for the game
/// 3. Render and write it
pub fn run(args: PlanArgs) -> Result<()> {
    let (team, _) = load_team(&args.bundle, &EngineConfig::default())?;

    let plan = GamePlan::build(&team, args.game)?;

    let text = if args.json {
        serde_json::to_string_pretty(&plan)?
    } else {
        plan.render_text()
    };

    match &args.output {
        Some(path) => write_plan(path, &text),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn write_plan(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("Failed to write plan {}", path.display()))?;
    println!("Plan saved to {}", path.display());
    Ok(())
}
