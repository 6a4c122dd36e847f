//! Roster command - move the roster between a bundle and CSV files
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - dispatch to import / export / template
//! - Level 2: import_csv(), export_csv(), write_template()
//! - Level 3: open_or_create_team(), read_csv()
//! - Level 4: (delegated to lineup_core::roster_csv)

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use lineup_core::roster_csv;
use lineup_core::{load_team, save_team, EngineConfig, Roster, Team};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct RosterArgs {
    #[command(subcommand)]
    pub action: RosterAction,
}

#[derive(Subcommand)]
pub enum RosterAction {
    /// Replace the bundle's roster with a CSV file
    Import {
        /// Team bundle; created if it does not exist
        #[arg(long, value_name = "FILE")]
        bundle: PathBuf,

        /// CSV with First Name, Last Name, Jersey Number columns
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,
    },
    /// Write the bundle's roster as CSV
    Export {
        #[arg(long, value_name = "FILE")]
        bundle: PathBuf,

        #[arg(long, short, value_name = "FILE")]
        output: PathBuf,
    },
    /// Write a blank roster CSV
    Template {
        /// Number of empty rows
        #[arg(long, default_value = "14")]
        players: usize,

        #[arg(long, short, value_name = "FILE", default_value = "roster_template.csv")]
        output: PathBuf,
    },
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run roster command
pub fn run(args: RosterArgs) -> Result<()> {
    match args.action {
        RosterAction::Import { bundle, csv } => import_csv(&bundle, &csv),
        RosterAction::Export { bundle, output } => export_csv(&bundle, &output),
        RosterAction::Template { players, output } => write_template(players, &output),
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Import a CSV roster
///
/// This function reads like a table of contents:
/// 1. Open the bundle (or start a new team)
/// 2. Parse and validate the CSV
/// 3. Replace the roster and save
///
/// A CSV that fails validation leaves the bundle untouched.
pub(crate) fn import_csv(bundle: &Path, csv: &Path) -> Result<()> {
    let mut team = open_or_create_team(bundle)?;

    let roster = read_csv(csv)?;

    team.replace_roster(roster)?;
    save_team(&team, bundle)?;

    println!("Imported {} players into {}", team.roster().len(), bundle.display());
    Ok(())
}

fn export_csv(bundle: &Path, output: &Path) -> Result<()> {
    let (team, _) = load_team(bundle, &EngineConfig::default())?;
    let file = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    roster_csv::write_roster(team.roster(), file)?;

    println!("Wrote {} players to {}", team.roster().len(), output.display());
    Ok(())
}

fn write_template(players: usize, output: &Path) -> Result<()> {
    let text = roster_csv::roster_template(players)?;
    std::fs::write(output, text).with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote roster template with {} rows to {}", players, output.display());
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn open_or_create_team(bundle: &Path) -> Result<Team> {
    let config = EngineConfig::default();
    if bundle.exists() {
        let (team, _) = load_team(bundle, &config)?;
        Ok(team)
    } else {
        tracing::info!("{} does not exist; starting a new team", bundle.display());
        Ok(Team::new(config))
    }
}

fn read_csv(path: &Path) -> Result<Roster> {
    let file = File::open(path).with_context(|| format!("Failed to open roster CSV {}", path.display()))?;
    roster_csv::read_roster(file).with_context(|| format!("Invalid roster CSV {}", path.display()))
}

// ============================================================================
// TESTS
// ============================================================================
