//! Team bundle persistence
//!
//! A bundle is the JSON file a coach downloads and uploads again later. Its
//! per-game data is keyed by game number (as a string) and by roster index,
//! so loading migrates indices to [`PlayerId`]s and saving converts back.
//!
//! Loading is all-or-nothing: a fully built [`Team`] is returned or an
//! [`ImportError`]. Entries under non-numeric game keys are not applied to the
//! engine; they are kept on the team as [`LabeledGameData`] and written back
//! unchanged on save. Data for unscheduled games and indices past the roster
//! is dropped. Both are logged and listed in the [`ImportReport`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::availability::{Availability, AvailabilityTable, AvailabilityTracker};
use crate::batting::{BattingOrder, BattingOrders};
use crate::config::EngineConfig;
use crate::error::ImportError;
use crate::fielding::{FieldingRotation, FieldingRotations, InningPositions, Position};
use crate::roster::{PlayerId, Roster};
use crate::roster_csv::{self, FIRST_NAME, JERSEY_NUMBER, LAST_NAME};
use crate::schedule::{Game, GameNumber, Schedule};
use crate::team::{Team, TeamInfo};

const GAME_NUMBER: &str = "Game #";
const DATE: &str = "Date";
const TIME: &str = "Time";
const OPPONENT: &str = "Opponent";
const INNINGS: &str = "Innings";
const INNING_PREFIX: &str = "Inning ";

type Row = Map<String, Value>;

// ============================================================================
// FILE FORMAT
// ============================================================================

/// Per-game availability stored column-wise by roster index
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityColumns {
    #[serde(default, alias = "Available")]
    pub available: Vec<bool>,
    #[serde(default, alias = "Can Play Catcher")]
    pub can_play_catcher: Vec<bool>,
}

/// On-disk bundle
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamBundle {
    #[serde(default)]
    pub team_info: Option<TeamInfo>,
    /// Record list or column map with `First Name`, `Last Name`, `Jersey Number`
    #[serde(default)]
    pub roster: Value,
    /// Record list or column map with `Game #`, `Date`, `Time`, `Opponent`, `Innings`
    #[serde(default)]
    pub schedule: Value,
    #[serde(default)]
    pub batting_orders: BTreeMap<String, Vec<usize>>,
    #[serde(default)]
    pub fielding_rotations: BTreeMap<String, BTreeMap<String, Vec<Option<String>>>>,
    #[serde(default)]
    pub player_availability: BTreeMap<String, AvailabilityColumns>,
}

/// Per-game entries under non-numeric keys, carried through load and save
/// without being interpreted
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabeledGameData {
    pub batting_orders: BTreeMap<String, Vec<usize>>,
    pub fielding_rotations: BTreeMap<String, BTreeMap<String, Vec<Option<String>>>>,
    pub player_availability: BTreeMap<String, AvailabilityColumns>,
}

impl LabeledGameData {
    pub fn is_empty(&self) -> bool {
        self.batting_orders.is_empty() && self.fielding_rotations.is_empty() && self.player_availability.is_empty()
    }
}

/// A game key as found in the file
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameKey {
    Number(GameNumber),
    Label(String),
}

impl GameKey {
    /// All-digit keys are game numbers; anything else stays a label
    pub fn parse(key: &str) -> Self {
        if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(number) = key.parse() {
                return GameKey::Number(number);
            }
        }
        GameKey::Label(key.to_string())
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKey::Number(n) => write!(f, "{}", n),
            GameKey::Label(s) => f.write_str(s),
        }
    }
}

/// What a load had to leave behind
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Game keys not applied to the engine: labels (kept for saving) and
    /// games that are not on the schedule (dropped)
    pub skipped_game_keys: Vec<String>,
    /// Index-keyed values that pointed past the roster or at invalid innings
    pub dropped_entries: usize,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.skipped_game_keys.is_empty() && self.dropped_entries == 0
    }

    fn skip_key(&mut self, section: &str, key: &str, reason: &str) {
        tracing::warn!("Ignoring {} for game key '{}': {}", section, key, reason);
        if !self.skipped_game_keys.iter().any(|k| k == key) {
            self.skipped_game_keys.push(key.to_string());
        }
    }

    fn drop_entries(&mut self, section: &str, game: GameNumber, count: usize) {
        if count > 0 {
            tracing::warn!("Game {}: dropped {} stale {} entries", game, count, section);
            self.dropped_entries += count;
        }
    }
}

impl TeamBundle {
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ImportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ========================================================================
    // SAVE
    // ========================================================================

    /// Snapshot a team in the index-keyed file layout
    pub fn from_team(team: &Team) -> Self {
        let roster = team.roster();
        let index_of = |id: PlayerId| roster.index_of(id);

        let roster_rows: Vec<Value> = roster
            .iter()
            .map(|p| {
                json!({
                    FIRST_NAME: p.first_name,
                    LAST_NAME: p.last_name,
                    JERSEY_NUMBER: p.jersey_number,
                })
            })
            .collect();

        let schedule_rows: Vec<Value> = team
            .schedule()
            .iter()
            .map(|g| {
                json!({
                    GAME_NUMBER: g.game_number,
                    DATE: g.date.map(|d| d.format("%Y-%m-%d").to_string()),
                    TIME: g.time.map(|t| t.format("%H:%M:%S").to_string()),
                    OPPONENT: g.opponent,
                    INNINGS: g.innings,
                })
            })
            .collect();

        let mut batting_orders = team.labeled.batting_orders.clone();
        batting_orders.extend(team.batting_orders().iter().map(|(game, order)| {
            let indices = order.iter().filter_map(index_of).collect();
            (game.to_string(), indices)
        }));

        let mut fielding_rotations = team.labeled.fielding_rotations.clone();
        fielding_rotations.extend(team.fielding_rotations().iter().map(|(game, rotation)| {
            let innings = rotation
                .innings()
                .map(|(inning, positions)| {
                    let column = roster
                        .ids()
                        .map(|id| positions.get(id).map(|p| p.as_str().to_string()))
                        .collect();
                    (format!("{}{}", INNING_PREFIX, inning), column)
                })
                .collect();
            (game.to_string(), innings)
        }));

        let mut player_availability = team.labeled.player_availability.clone();
        player_availability.extend(team.availability().iter().map(|(game, table)| {
            let entries: Vec<Availability> = roster.ids().map(|id| table.get(id)).collect();
            let columns = AvailabilityColumns {
                available: entries.iter().map(|a| a.available).collect(),
                can_play_catcher: entries.iter().map(|a| a.can_play_catcher).collect(),
            };
            (game.to_string(), columns)
        }));

        Self {
            team_info: Some(team.info.clone()),
            roster: Value::Array(roster_rows),
            schedule: Value::Array(schedule_rows),
            batting_orders,
            fielding_rotations,
            player_availability,
        }
    }

    // ========================================================================
    // LOAD
    // ========================================================================

    /// Build a complete team. Nothing is returned unless every table parses.
    pub fn into_team(self, config: &EngineConfig) -> Result<(Team, ImportReport), ImportError> {
        let mut report = ImportReport::default();
        let mut labeled = LabeledGameData::default();

        let info = self.team_info.unwrap_or_default();
        let roster = parse_roster(&self.roster)?;
        let schedule = parse_schedule(&self.schedule, config)?;

        let availability = migrate_availability(
            self.player_availability,
            &roster,
            &schedule,
            &mut labeled.player_availability,
            &mut report,
        );
        let batting = migrate_batting(self.batting_orders, &roster, &schedule, &mut labeled.batting_orders, &mut report);
        let fielding = migrate_fielding(
            self.fielding_rotations,
            &roster,
            &schedule,
            &mut labeled.fielding_rotations,
            &mut report,
        )?;

        tracing::info!(
            "Loaded team '{}': {} players, {} games",
            info.team_name,
            roster.len(),
            schedule.len()
        );
        let mut team = Team::from_parts(config.clone(), info, roster, schedule, availability, batting, fielding);
        team.labeled = labeled;
        Ok((team, report))
    }
}

/// Read a bundle file into a fresh team
pub fn load_team(path: impl AsRef<Path>, config: &EngineConfig) -> anyhow::Result<(Team, ImportReport)> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read team bundle {}", path.display()))?;
    let bundle = TeamBundle::from_json(&text)
        .with_context(|| format!("Failed to parse team bundle {}", path.display()))?;
    let loaded = bundle
        .into_team(config)
        .with_context(|| format!("Invalid team bundle {}", path.display()))?;
    Ok(loaded)
}

/// Write a team as a pretty-printed bundle
pub fn save_team(team: &Team, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = TeamBundle::from_team(team).to_json()?;
    std::fs::write(path, json).with_context(|| format!("Failed to write team bundle {}", path.display()))?;
    tracing::info!("Saved team bundle to {}", path.display());
    Ok(())
}

// ============================================================================
// TABLES
// ============================================================================

/// Rows of a table stored either as a list of records or as a column map
/// (`{"column": {"0": cell, "1": cell}}` or `{"column": [cell, cell]}`).
fn table_rows(value: &Value, table: &str) -> Result<Vec<Row>, ImportError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(records) => records
            .iter()
            .map(|record| match record {
                Value::Object(row) => Ok(row.clone()),
                other => Err(ImportError::Malformed(format!("{} record is not an object: {}", table, other))),
            })
            .collect(),
        Value::Object(columns) => {
            let mut rows: BTreeMap<usize, Row> = BTreeMap::new();
            for (column, cells) in columns {
                match cells {
                    Value::Object(by_index) => {
                        for (index, cell) in by_index {
                            let index: usize = index.parse().map_err(|_| {
                                ImportError::Malformed(format!("{} column '{}' has row key '{}'", table, column, index))
                            })?;
                            rows.entry(index).or_default().insert(column.clone(), cell.clone());
                        }
                    }
                    Value::Array(list) => {
                        for (index, cell) in list.iter().enumerate() {
                            rows.entry(index).or_default().insert(column.clone(), cell.clone());
                        }
                    }
                    other => {
                        return Err(ImportError::Malformed(format!(
                            "{} column '{}' is not a list or map: {}",
                            table, column, other
                        )))
                    }
                }
            }
            Ok(rows.into_values().collect())
        }
        other => Err(ImportError::Malformed(format!("{} must be a table, got {}", table, other))),
    }
}

/// Present, non-null, non-blank cell as text
fn cell_text(row: &Row, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        other => Some(other.to_string()),
    }
}

fn cell_number(row: &Row, column: &str) -> Option<u64> {
    match row.get(column)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_roster(value: &Value) -> Result<Roster, ImportError> {
    let rows = table_rows(value, "roster")?;

    if let Some(first) = rows.first() {
        let missing: Vec<String> = roster_csv::REQUIRED_COLUMNS
            .iter()
            .filter(|col| !first.contains_key(**col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }
    }

    let mut parsed = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let line = index + 1;
        let missing = |column: &str| ImportError::MissingValues {
            row: line,
            column: column.to_string(),
        };
        let first = cell_text(row, FIRST_NAME).ok_or_else(|| missing(FIRST_NAME))?;
        let last = cell_text(row, LAST_NAME).ok_or_else(|| missing(LAST_NAME))?;
        let jersey_text = cell_text(row, JERSEY_NUMBER).ok_or_else(|| missing(JERSEY_NUMBER))?;
        let jersey = roster_csv::parse_jersey(&jersey_text).ok_or(ImportError::InvalidJersey {
            row: line,
            value: jersey_text.clone(),
        })?;
        parsed.push((first, last, jersey));
    }

    let mut seen = FxHashSet::default();
    for (_, _, jersey) in &parsed {
        if !seen.insert(*jersey) {
            return Err(ImportError::DuplicateJersey(*jersey));
        }
    }

    Ok(Roster::from_rows(parsed)?)
}

fn parse_schedule(value: &Value, config: &EngineConfig) -> Result<Schedule, ImportError> {
    let rows = table_rows(value, "schedule")?;
    let mut games = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let game_number = match row.get(GAME_NUMBER) {
            None | Some(Value::Null) => index as GameNumber + 1,
            Some(_) => cell_number(row, GAME_NUMBER)
                .and_then(|n| GameNumber::try_from(n).ok())
                .ok_or_else(|| ImportError::Malformed(format!("schedule row {}: invalid game number", index + 1)))?,
        };
        let innings = match row.get(INNINGS) {
            None | Some(Value::Null) => config.default_innings,
            Some(_) => cell_number(row, INNINGS)
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ImportError::Malformed(format!("game {}: invalid innings", game_number)))?,
        };

        let mut game = Game::new(game_number, cell_text(row, OPPONENT).unwrap_or_default(), innings);
        game.date = parse_date(row.get(DATE), game_number)?;
        game.time = parse_time(row.get(TIME), game_number)?;
        games.push(game);
    }

    Ok(Schedule::from_games(games, config)?)
}

/// ISO date, ISO datetime (date part kept) or epoch milliseconds
fn parse_date(cell: Option<&Value>, game: GameNumber) -> Result<Option<NaiveDate>, ImportError> {
    fn invalid(game: GameNumber, raw: impl fmt::Display) -> ImportError {
        ImportError::Malformed(format!("game {}: invalid date '{}'", game, raw))
    }
    match cell {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(Some)
            .ok_or_else(|| invalid(game, s)),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| Some(dt.date_naive()))
            .ok_or_else(|| invalid(game, n)),
        Some(other) => Err(invalid(game, other)),
    }
}

const TIME_FORMATS: [&str; 4] = ["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M%p"];

fn parse_time(cell: Option<&Value>, game: GameNumber) -> Result<Option<NaiveTime>, ImportError> {
    match cell {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(s, format).ok())
                .map(Some)
                .ok_or_else(|| ImportError::Malformed(format!("game {}: invalid time '{}'", game, s)))
        }
        Some(other) => Err(ImportError::Malformed(format!("game {}: invalid time '{}'", game, other))),
    }
}

// ============================================================================
// INDEX MIGRATION
// ============================================================================

/// Where the entry under a per-game key goes
enum KeyTarget {
    Game(GameNumber),
    /// Kept as is for the next save
    Label,
    /// Numeric but not scheduled; dropped
    Unscheduled,
}

fn classify_key(key: &str, section: &str, schedule: &Schedule, report: &mut ImportReport) -> KeyTarget {
    match GameKey::parse(key) {
        GameKey::Number(game) if schedule.contains(game) => KeyTarget::Game(game),
        GameKey::Number(_) => {
            report.skip_key(section, key, "game is not on the schedule");
            KeyTarget::Unscheduled
        }
        GameKey::Label(_) => {
            report.skip_key(section, key, "not a game number, kept unchanged");
            KeyTarget::Label
        }
    }
}

fn migrate_availability(
    data: BTreeMap<String, AvailabilityColumns>,
    roster: &Roster,
    schedule: &Schedule,
    labeled: &mut BTreeMap<String, AvailabilityColumns>,
    report: &mut ImportReport,
) -> AvailabilityTracker {
    let mut tracker = AvailabilityTracker::new();
    for (key, columns) in data {
        let game = match classify_key(&key, "availability", schedule, report) {
            KeyTarget::Game(game) => game,
            KeyTarget::Label => {
                labeled.insert(key, columns);
                continue;
            }
            KeyTarget::Unscheduled => continue,
        };
        let mut table = AvailabilityTable::for_roster(roster);
        for (index, available) in columns.available.iter().enumerate() {
            if let Some(player) = roster.by_index(index) {
                let catcher = columns.can_play_catcher.get(index).copied().unwrap_or(false);
                table.set(player.id, Availability::new(*available, catcher));
            }
        }
        report.drop_entries("availability", game, columns.available.len().saturating_sub(roster.len()));
        tracker.insert(game, table);
    }
    tracker
}

fn migrate_batting(
    data: BTreeMap<String, Vec<usize>>,
    roster: &Roster,
    schedule: &Schedule,
    labeled: &mut BTreeMap<String, Vec<usize>>,
    report: &mut ImportReport,
) -> BattingOrders {
    let mut orders = BattingOrders::new();
    for (key, indices) in data {
        let game = match classify_key(&key, "batting order", schedule, report) {
            KeyTarget::Game(game) => game,
            KeyTarget::Label => {
                labeled.insert(key, indices);
                continue;
            }
            KeyTarget::Unscheduled => continue,
        };
        let ids: Vec<PlayerId> = indices
            .iter()
            .filter_map(|index| roster.by_index(*index).map(|p| p.id))
            .collect();
        report.drop_entries("batting order", game, indices.len() - ids.len());

        let mut order = BattingOrder::from_ids(ids);
        order.sync(roster);
        orders.insert(game, order);
    }
    orders
}

fn migrate_fielding(
    data: BTreeMap<String, BTreeMap<String, Vec<Option<String>>>>,
    roster: &Roster,
    schedule: &Schedule,
    labeled: &mut BTreeMap<String, BTreeMap<String, Vec<Option<String>>>>,
    report: &mut ImportReport,
) -> Result<FieldingRotations, ImportError> {
    let mut rotations = FieldingRotations::new();
    for (key, innings) in data {
        let game_number = match classify_key(&key, "fielding rotation", schedule, report) {
            KeyTarget::Game(game) => game,
            KeyTarget::Label => {
                labeled.insert(key, innings);
                continue;
            }
            KeyTarget::Unscheduled => continue,
        };
        let Some(game) = schedule.get(game_number) else {
            continue;
        };

        let mut rotation = FieldingRotation::new();
        for (inning_key, column) in innings {
            let inning = inning_key
                .strip_prefix(INNING_PREFIX)
                .and_then(|n| n.trim().parse::<u32>().ok())
                .filter(|n| game.has_inning(*n));
            let Some(inning) = inning else {
                tracing::warn!("Game {}: ignoring fielding key '{}'", game_number, inning_key);
                report.drop_entries("fielding", game_number, column.len());
                continue;
            };

            let mut assignments = Vec::with_capacity(roster.len());
            for (index, label) in column.iter().enumerate() {
                let (Some(player), Some(label)) = (roster.by_index(index), label) else {
                    continue;
                };
                let position: Position = label.parse()?;
                assignments.push((player.id, position));
            }
            report.drop_entries("fielding", game_number, column.len().saturating_sub(roster.len()));

            let mut positions = InningPositions::from_assignments(assignments);
            positions.sync(roster);
            rotation.set_inning(inning, positions);
        }
        rotations.insert(game_number, rotation);
    }
    Ok(rotations)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bundle in the legacy column-oriented layout
    const LEGACY: &str = r#"{
        "team_info": {"team_name": "Hawks", "league": "Minors", "head_coach": "Pat"},
        "roster": {
            "First Name": {"0": "Ann", "1": "Bo", "2": "Cy"},
            "Last Name": {"0": "Lee", "1": "Diaz", "2": "Ng"},
            "Jersey Number": {"0": 7, "1": 12.0, "2": "3"}
        },
        "schedule": {
            "Game #": {"0": 1, "1": 2},
            "Date": {"0": "2023-06-11T00:00:00", "1": null},
            "Time": {"0": "17:30:00", "1": "6:00 PM"},
            "Opponent": {"0": "Tigers", "1": "Bears"},
            "Innings": {"0": 2, "1": 6}
        },
        "batting_orders": {"1": [2, 0, 1, 9], "notes": [0]},
        "fielding_rotations": {
            "1": {"Inning 1": ["Catcher", "Pitcher", "Bench"], "Inning 7": ["Bench"]}
        },
        "player_availability": {
            "1": {"Available": [true, false, true], "Can Play Catcher": [true, false, false]},
            "5": {"Available": [true]}
        }
    }"#;

    #[test]
    fn test_load_legacy_bundle() {
        let bundle = TeamBundle::from_json(LEGACY).unwrap();
        let (team, report) = bundle.into_team(&EngineConfig::default()).unwrap();

        assert_eq!(team.info.team_name, "Hawks");
        assert_eq!(team.info.assistant_coach1, "");
        assert_eq!(team.roster().len(), 3);
        assert_eq!(team.roster().by_index(1).unwrap().jersey_number, 12);

        let game1 = team.schedule().get(1).unwrap();
        assert_eq!(game1.date, NaiveDate::from_ymd_opt(2023, 6, 11));
        assert_eq!(game1.time, NaiveTime::from_hms_opt(17, 30, 0));
        assert_eq!(team.schedule().get(2).unwrap().time, NaiveTime::from_hms_opt(18, 0, 0));

        let order = team.batting_orders().get(1).unwrap();
        assert_eq!(order.as_slice(), &[PlayerId(2), PlayerId(0), PlayerId(1)]);

        let inning = team.fielding_rotations().get(1).unwrap().inning(1).unwrap();
        assert_eq!(inning.get(PlayerId(0)), Some(Position::Catcher));
        assert_eq!(inning.get(PlayerId(1)), Some(Position::Pitcher));

        let availability = team.availability_for(1);
        assert!(!availability.is_available(PlayerId(1)));
        assert!(availability.can_play_catcher(PlayerId(0)));

        assert_eq!(report.skipped_game_keys, vec!["5".to_string(), "notes".to_string()]);
        // the label is kept for the next save, the unscheduled game is not
        assert_eq!(team.labeled.batting_orders.get("notes"), Some(&vec![0]));
        assert!(team.labeled.player_availability.is_empty());
        // index 9 in the batting order and the out-of-range inning 7
        assert_eq!(report.dropped_entries, 2);
    }

    #[test]
    fn test_unknown_position_fails_whole_load() {
        let text = r#"{
            "roster": [{"First Name": "Ann", "Last Name": "Lee", "Jersey Number": 7}],
            "schedule": [{"Game #": 1, "Opponent": "Tigers", "Innings": 3}],
            "fielding_rotations": {"1": {"Inning 1": ["Goalie"]}}
        }"#;
        let result = TeamBundle::from_json(text).unwrap().into_team(&EngineConfig::default());
        assert!(matches!(result, Err(ImportError::Position(_))));
    }

    #[test]
    fn test_duplicate_jersey_rejected() {
        let text = r#"{
            "roster": [
                {"First Name": "Ann", "Last Name": "Lee", "Jersey Number": 7},
                {"First Name": "Bo", "Last Name": "Diaz", "Jersey Number": 7}
            ]
        }"#;
        let result = TeamBundle::from_json(text).unwrap().into_team(&EngineConfig::default());
        assert!(matches!(result, Err(ImportError::DuplicateJersey(7))));
    }

    #[test]
    fn test_missing_sections_default() {
        let (team, report) = TeamBundle::from_json("{}")
            .unwrap()
            .into_team(&EngineConfig::default())
            .unwrap();
        assert!(team.roster().is_empty());
        assert!(team.schedule().is_empty());
        assert_eq!(team.info, TeamInfo::default());
        assert!(report.is_clean());
    }

    #[test]
    fn test_save_then_load_preserves_team() {
        let config = EngineConfig::default();
        let mut team = Team::new(config.clone());
        team.info.team_name = "Hawks".into();
        for (jersey, first) in [(4, "Ann"), (8, "Bo"), (15, "Cy")] {
            team.add_player(first, "Smith", jersey).unwrap();
        }
        team.add_game(
            Game::new(1, "Tigers", 2)
                .with_date(NaiveDate::from_ymd_opt(2024, 5, 4).unwrap())
                .with_time(NaiveTime::from_hms_opt(10, 15, 0).unwrap()),
        )
        .unwrap();
        team.set_availability(1, PlayerId(1), Availability::unavailable()).unwrap();
        team.auto_arrange_batting(1).unwrap();
        team.auto_out_unavailable(1).unwrap();

        let json = TeamBundle::from_team(&team).to_json().unwrap();
        let (loaded, report) = TeamBundle::from_json(&json).unwrap().into_team(&config).unwrap();

        assert!(report.is_clean());
        assert_eq!(loaded, team);
    }

    #[test]
    fn test_labeled_game_keys_survive_save() {
        let text = r#"{
            "roster": [
                {"First Name": "Ann", "Last Name": "Lee", "Jersey Number": 7},
                {"First Name": "Bo", "Last Name": "Diaz", "Jersey Number": 8}
            ],
            "schedule": [{"Game #": 1, "Opponent": "Tigers", "Innings": 2}],
            "batting_orders": {"1": [1, 0], "practice": [0, 1]},
            "fielding_rotations": {"practice": {"Inning 1": ["Pitcher", "Catcher"]}},
            "player_availability": {"practice": {"available": [false, true], "can_play_catcher": [true, false]}}
        }"#;
        let config = EngineConfig::default();
        let (team, report) = TeamBundle::from_json(text).unwrap().into_team(&config).unwrap();

        assert_eq!(report.skipped_game_keys, vec!["practice".to_string()]);
        assert!(!team.labeled.is_empty());
        assert_eq!(team.batting_orders().len(), 1);
        assert!(team.fielding_rotations().get(1).is_none());

        let saved = TeamBundle::from_team(&team);
        let keys: Vec<&str> = saved.batting_orders.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["1", "practice"]);
        assert_eq!(saved.batting_orders["practice"], vec![0, 1]);
        assert_eq!(
            saved.fielding_rotations["practice"]["Inning 1"],
            vec![Some("Pitcher".to_string()), Some("Catcher".to_string())]
        );
        assert_eq!(saved.player_availability["practice"].available, vec![false, true]);
        assert_eq!(saved.player_availability["practice"].can_play_catcher, vec![true, false]);

        let json = saved.to_json().unwrap();
        let (reloaded, _) = TeamBundle::from_json(&json).unwrap().into_team(&config).unwrap();
        assert_eq!(reloaded, team);
    }

    #[test]
    fn test_game_key_parse() {
        assert_eq!(GameKey::parse("12"), GameKey::Number(12));
        assert_eq!(GameKey::parse("-1"), GameKey::Label("-1".into()));
        assert_eq!(GameKey::parse(""), GameKey::Label(String::new()));
        assert_eq!(GameKey::parse("99999999999"), GameKey::Label("99999999999".into()));
    }
}
