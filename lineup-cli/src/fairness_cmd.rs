//! Fairness command - batting slot and position-group distribution
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_report(), print_report()
//! - Level 3: (delegated to lineup_core::fairness)
//! - Level 4: text tables from lineup_core::report

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use lineup_core::fairness::bench_summary;
use lineup_core::report::{batting_table_text, bench_summary_text, fielding_table_text};
use lineup_core::{load_team, BattingDistribution, BenchSummary, EngineConfig, FieldingDistribution, GameNumber, Team};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct FairnessArgs {
    /// Team bundle JSON file
    #[arg(long, value_name = "FILE")]
    pub bundle: PathBuf,

    /// Fielding table for a single game (OUT innings included)
    #[arg(long)]
    pub game: Option<GameNumber>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
pub(crate) struct FairnessReport {
    /// Omitted for a single-game report
    #[serde(skip_serializing_if = "Option::is_none")]
    batting: Option<BattingDistribution>,
    fielding: FieldingDistribution,
    bench: Option<BenchSummary>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run fairness command
///
/// This function reads like a table of contents:
/// 1. Load the bundle
/// 2. Build the distributions
/// 3. Print tables or JSON
pub fn run(args: FairnessArgs) -> Result<()> {
    let (team, _) = load_team(&args.bundle, &EngineConfig::default())?;

    let report = build_report(&team, args.game)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

pub(crate) fn build_report(team: &Team, game: Option<GameNumber>) -> Result<FairnessReport> {
    let (batting, fielding) = match game {
        Some(n) => (None, team.game_fielding_distribution(n)?),
        None => (Some(team.batting_distribution()), team.fielding_distribution()),
    };
    let bench = bench_summary(&fielding);
    Ok(FairnessReport {
        batting,
        fielding,
        bench,
    })
}

fn print_report(report: &FairnessReport) {
    if let Some(batting) = &report.batting {
        println!("=== Batting Order Distribution ===");
        println!("{}", batting_table_text(batting));
    }

    println!("=== Fielding Distribution ===");
    println!("{}", fielding_table_text(&report.fielding));

    if let Some(bench) = &report.bench {
        println!("{}", bench_summary_text(bench));
    }
}

// ============================================================================
// TESTS
// ============================================================================
