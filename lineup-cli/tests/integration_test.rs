//! Integration tests for the lineup planner
//!
//! Tests the full stack: bundle load, edits, validation, fairness and save

use lineup_core::example::example_team;
use lineup_core::roster_csv;
use lineup_core::{
    load_team, save_team, Availability, BattingCell, EngineConfig, GamePlan, Position, SlotLabel, Team,
    TeamBundle,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use std::path::PathBuf;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn temp_bundle(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lineup-it-{}-{}.json", std::process::id(), name))
}

fn season() -> Team {
    example_team(&mut ChaCha8Rng::seed_from_u64(2023), &EngineConfig::default(), 4).unwrap()
}

// ============================================================================
// BUNDLE TESTS
// ============================================================================

#[test]
fn test_save_and_load_season() {
    let team = season();
    let path = temp_bundle("season");

    save_team(&team, &path).unwrap();
    let (loaded, report) = load_team(&path, &EngineConfig::default()).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(report.is_clean());
    assert_eq!(loaded, team);
}

#[test]
fn test_missing_bundle_reports_path() {
    let err = load_team("/nonexistent/lineup.json", &EngineConfig::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("/nonexistent/lineup.json"));
}

// ============================================================================
// EDIT → VALIDATE → SAVE
// ============================================================================

#[test]
fn test_game_day_workflow() {
    let mut team = season();
    let game = 2;
    let absent = team.roster().by_jersey(5).unwrap().id;
    let catcher = team.roster().by_jersey(1).unwrap().id;

    // Player setup
    team.set_availability(game, absent, Availability::new(false, false)).unwrap();
    team.set_availability(game, catcher, Availability::new(true, true)).unwrap();

    // Unavailable player drops to the end of the stored order
    let order = team.batting_order(game).unwrap();
    assert_eq!(order.as_slice().last(), Some(&absent));
    assert_eq!(order.len(), 14);

    // Fielding still has the absent player on the field or bench
    let before = team.validate_game(game).unwrap();
    assert!(!before.warnings(team.roster()).is_empty());

    team.auto_out_unavailable(game).unwrap();
    let after = team.validate_game(game).unwrap();
    assert!(after
        .fielding
        .iter()
        .all(|issue| !matches!(issue.kind, lineup_core::FieldingIssueKind::UnavailableNotMarkedOut { .. })));

    // Round trip through a bundle file keeps every edit
    let path = temp_bundle("workflow");
    save_team(&team, &path).unwrap();
    let (mut loaded, _) = load_team(&path, &EngineConfig::default()).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(!loaded.availability_for(game).is_available(absent));
    assert_eq!(loaded.batting_order(game).unwrap().as_slice().last(), Some(&absent));
    let rotation = loaded.fielding_rotation(game).unwrap();
    assert!(rotation.innings().all(|(_, p)| p.get(absent) == Some(Position::Out)));
}

#[test]
fn test_edited_batting_labels_keep_a_full_order() {
    let mut team = season();
    let ids: Vec<_> = team.roster().ids().collect();

    let mut labels = FxHashMap::default();
    labels.insert(ids[0], SlotLabel::Slot(3));
    labels.insert(ids[1], SlotLabel::Slot(3));
    labels.insert(ids[2], SlotLabel::Slot(1));

    let issues = team.set_batting_labels(1, &labels).unwrap();
    assert!(!issues.is_empty());

    let order = team.batting_order(1).unwrap().clone();
    assert!(order.is_permutation_of(team.roster()));
}

#[test]
fn test_fielding_duplicate_fails_validation() {
    let mut team = season();
    let ids: Vec<_> = team.roster().ids().collect();
    let assignments: Vec<_> = ids.iter().map(|&id| (id, Position::Bench)).collect();
    team.set_inning_positions(3, 1, &assignments).unwrap();
    team.set_inning_positions(3, 1, &[(ids[0], Position::Pitcher), (ids[1], Position::Pitcher)])
        .unwrap();

    let report = team.validate_game(3).unwrap();
    assert!(!report.all_valid());
    let errors = report.errors(team.roster());
    assert!(errors.iter().any(|e| e.contains("Duplicate position: Pitcher")));
    assert!(errors.iter().any(|e| e.contains("Missing position: Catcher")));
}

// ============================================================================
// FAIRNESS & REPORTS
// ============================================================================

#[test]
fn test_fairness_across_season() {
    let team = season();

    let batting = team.batting_distribution();
    for row in &batting.rows {
        assert_eq!(row.games_batted(), 4);
    }

    let fielding = team.fielding_distribution();
    for row in &fielding.rows {
        let counts = &row.counts;
        assert_eq!(counts.total_innings, 4 * 6);
        assert_eq!(counts.infield + counts.outfield + counts.bench, counts.total_innings);
    }
}

#[test]
fn test_plan_for_scheduled_game() {
    let mut team = season();
    let absent = team.roster().by_jersey(9).unwrap().id;
    team.set_availability(1, absent, Availability::new(false, false)).unwrap();

    let plan = GamePlan::build(&team, 1).unwrap();
    assert_eq!(plan.rows.len(), 14);
    let row = plan.rows.iter().find(|r| r.player == absent).unwrap();
    assert_eq!(row.batting, BattingCell::Out);
    assert!(row.positions.iter().all(|p| *p == Some(Position::Out)));

    let text = plan.render_text();
    assert!(text.contains("GAME 1 LINEUP"));
    assert!(text.contains("POSITION LEGEND:"));
}

// ============================================================================
// ROSTER CSV
// ============================================================================

#[test]
fn test_csv_export_import_replaces_roster() {
    let team = season();
    let mut out = Vec::new();
    roster_csv::write_roster(team.roster(), &mut out).unwrap();

    let roster = roster_csv::read_roster(out.as_slice()).unwrap();
    assert_eq!(roster.len(), 14);

    let mut fresh = season();
    fresh.replace_roster(roster).unwrap();
    assert_eq!(fresh.schedule().len(), 4);
    assert!(fresh.batting_orders().is_empty());

    let bundle = TeamBundle::from_team(&fresh);
    let (reloaded, report) = bundle.into_team(&EngineConfig::default()).unwrap();
    assert!(report.is_clean());
    assert_eq!(reloaded.roster(), fresh.roster());
}
