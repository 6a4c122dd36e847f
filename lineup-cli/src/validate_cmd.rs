//! Validate command - report batting and fielding issues
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: collect_reports(), report_results()
//! - Level 3: (delegated to Team::validate_game)
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use lineup_core::{load_team, EngineConfig, GameNumber, GameValidation, Team};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ValidateArgs {
    /// Team bundle JSON file
    #[arg(long, value_name = "FILE")]
    pub bundle: PathBuf,

    /// Only validate this game
    #[arg(long)]
    pub game: Option<GameNumber>,

    /// Exit with an error when any game has duplicate or missing positions
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Messages for one game, names resolved
#[derive(Debug, Serialize)]
pub(crate) struct GameMessages {
    game_number: GameNumber,
    all_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run validate command
///
/// This function reads like a table of contents:
/// 1. Load the bundle
/// 2. Validate the selected games
/// 3. Report (and optionally fail)
pub fn run(args: ValidateArgs) -> Result<()> {
    let (team, report) = load_team(&args.bundle, &EngineConfig::default())?;
    if !report.is_clean() {
        tracing::warn!(
            "Bundle had {} skipped game keys and {} dropped entries",
            report.skipped_game_keys.len(),
            report.dropped_entries
        );
    }

    let results = collect_reports(&team, args.game)?;

    report_results(&results, args.json);

    let invalid = results.iter().filter(|r| !r.all_valid).count();
    if args.strict && invalid > 0 {
        anyhow::bail!("{} game(s) have invalid fielding", invalid);
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

pub(crate) fn collect_reports(team: &Team, game: Option<GameNumber>) -> Result<Vec<GameMessages>> {
    let reports: Vec<GameValidation> = match game {
        Some(n) => vec![team.validate_game(n)?],
        None => team.validate_all(),
    };

    Ok(reports
        .into_iter()
        .map(|report| GameMessages {
            game_number: report.game_number,
            all_valid: report.all_valid(),
            errors: report.errors(team.roster()),
            warnings: report.warnings(team.roster()),
        })
        .collect())
}

fn report_results(results: &[GameMessages], json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string_pretty(results) {
            println!("{}", text);
        }
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_text_results(results: &[GameMessages]) {
    let errors: Vec<&String> = results.iter().flat_map(|r| &r.errors).collect();
    let warnings: Vec<&String> = results.iter().flat_map(|r| &r.warnings).collect();

    if errors.is_empty() && warnings.is_empty() {
        println!("All lineups are valid ({} games checked)", results.len());
        return;
    }

    if !errors.is_empty() {
        println!("=== Errors ===");
        for e in &errors {
            println!("  {}", e);
        }
    }
    if !warnings.is_empty() {
        println!("=== Warnings ===");
        for w in &warnings {
            println!("  {}", w);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
