//! Fielding rotations
//!
//! Each game holds, per inning, the position of every roster player. The
//! structure does not prevent duplicate or missing positions; [`validate`]
//! reports them and the caller decides what to do.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityTable;
use crate::error::UnknownPosition;
use crate::roster::{PlayerId, Roster};
use crate::schedule::{Game, GameNumber};

// ============================================================================
// POSITIONS
// ============================================================================

/// Fielding position vocabulary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Pitcher,
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "RF")]
    RightField,
    #[serde(rename = "LC")]
    LeftCenter,
    #[serde(rename = "RC")]
    RightCenter,
    Bench,
    #[serde(rename = "OUT")]
    Out,
}

/// Positions that must be covered every inning, in display order
pub const FIELD_POSITIONS: [Position; 10] = [
    Position::Pitcher,
    Position::Catcher,
    Position::FirstBase,
    Position::SecondBase,
    Position::ThirdBase,
    Position::Shortstop,
    Position::LeftField,
    Position::RightField,
    Position::LeftCenter,
    Position::RightCenter,
];

/// Coarse grouping used by the fairness reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionGroup {
    Infield,
    Outfield,
    Bench,
    Out,
}

impl Position {
    /// Label used in bundles and grids
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Pitcher => "Pitcher",
            Position::Catcher => "Catcher",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::RightField => "RF",
            Position::LeftCenter => "LC",
            Position::RightCenter => "RC",
            Position::Bench => "Bench",
            Position::Out => "OUT",
        }
    }

    /// Pitcher and Catcher are counted with their neighbors: Pitcher with the
    /// infield, Catcher with the outfield.
    pub fn group(&self) -> PositionGroup {
        match self {
            Position::Pitcher
            | Position::FirstBase
            | Position::SecondBase
            | Position::ThirdBase
            | Position::Shortstop => PositionGroup::Infield,
            Position::Catcher
            | Position::LeftField
            | Position::RightField
            | Position::LeftCenter
            | Position::RightCenter => PositionGroup::Outfield,
            Position::Bench => PositionGroup::Bench,
            Position::Out => PositionGroup::Out,
        }
    }

    /// Requires a player on the field
    pub fn is_field(&self) -> bool {
        !matches!(self, Position::Bench | Position::Out)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let position = match s.trim().to_ascii_uppercase().as_str() {
            "PITCHER" | "P" => Position::Pitcher,
            "CATCHER" | "C" => Position::Catcher,
            "1B" => Position::FirstBase,
            "2B" => Position::SecondBase,
            "3B" => Position::ThirdBase,
            "SS" => Position::Shortstop,
            "LF" => Position::LeftField,
            "RF" => Position::RightField,
            "LC" => Position::LeftCenter,
            "RC" => Position::RightCenter,
            "BENCH" => Position::Bench,
            "OUT" => Position::Out,
            _ => return Err(UnknownPosition(s.to_string())),
        };
        Ok(position)
    }
}

// ============================================================================
// INNING POSITIONS
// ============================================================================

/// Position of every roster player for one inning
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InningPositions {
    positions: FxHashMap<PlayerId, Position>,
}

impl InningPositions {
    /// The k-th roster player takes the k-th field position; everyone past
    /// the last field position sits on the bench.
    pub fn default_for(roster: &Roster) -> Self {
        Self::rotated_for(roster, 0)
    }

    /// Like [`InningPositions::default_for`] with the field positions shifted
    /// by `offset` for the first ten players.
    pub fn rotated_for(roster: &Roster, offset: usize) -> Self {
        let positions = roster
            .ids()
            .enumerate()
            .map(|(k, id)| {
                let position = if k < FIELD_POSITIONS.len() {
                    FIELD_POSITIONS[(k + offset) % FIELD_POSITIONS.len()]
                } else {
                    Position::Bench
                };
                (id, position)
            })
            .collect();
        Self { positions }
    }

    pub fn from_assignments<I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (PlayerId, Position)>,
    {
        Self {
            positions: assignments.into_iter().collect(),
        }
    }

    pub fn get(&self, player: PlayerId) -> Option<Position> {
        self.positions.get(&player).copied()
    }

    pub fn set(&mut self, player: PlayerId, position: Position) {
        self.positions.insert(player, position);
    }

    pub fn remove_player(&mut self, player: PlayerId) {
        self.positions.remove(&player);
    }

    /// Bench new roster players, drop departed ones
    pub fn sync(&mut self, roster: &Roster) -> bool {
        let before = self.positions.len();
        self.positions.retain(|id, _| roster.contains(*id));
        let mut changed = self.positions.len() != before;
        for id in roster.ids() {
            if !self.positions.contains_key(&id) {
                self.positions.insert(id, Position::Bench);
                changed = true;
            }
        }
        changed
    }

    /// Assignments in roster order; players without one are skipped
    pub fn in_roster_order(&self, roster: &Roster) -> Vec<(PlayerId, Position)> {
        roster
            .ids()
            .filter_map(|id| self.get(id).map(|pos| (id, pos)))
            .collect()
    }

    pub fn count(&self, position: Position) -> usize {
        self.positions.values().filter(|p| **p == position).count()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

// ============================================================================
// ISSUES
// ============================================================================

/// What is wrong with one inning
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum FieldingIssueKind {
    /// A field position is held by more than one player
    DuplicateField { position: Position },
    /// A field position is held by nobody
    MissingCoverage { position: Position },
    /// An unavailable player holds something other than OUT
    UnavailableNotMarkedOut { player: PlayerId, position: Position },
    /// Catcher assigned to a player without the catcher flag
    UncertifiedCatcher { player: PlayerId },
}

impl FieldingIssueKind {
    /// Coverage problems fail the validation summary; the rest are warnings
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            FieldingIssueKind::DuplicateField { .. } | FieldingIssueKind::MissingCoverage { .. }
        )
    }
}

/// An issue located in a specific inning
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldingIssue {
    pub inning: u32,
    #[serde(flatten)]
    pub kind: FieldingIssueKind,
}

impl FieldingIssue {
    pub fn is_blocking(&self) -> bool {
        self.kind.is_blocking()
    }

    /// Human-readable message with player names resolved
    pub fn describe(&self, roster: &Roster) -> String {
        let name = |id: PlayerId| {
            roster
                .get(id)
                .map(|p| p.full_name())
                .unwrap_or_else(|| id.to_string())
        };
        match &self.kind {
            FieldingIssueKind::DuplicateField { position } => {
                format!("Inning {}: Duplicate position: {}", self.inning, position)
            }
            FieldingIssueKind::MissingCoverage { position } => {
                format!("Inning {}: Missing position: {}", self.inning, position)
            }
            FieldingIssueKind::UnavailableNotMarkedOut { player, position } => format!(
                "Inning {}: Unavailable player {} should be marked as OUT, not {}",
                self.inning,
                name(*player),
                position
            ),
            FieldingIssueKind::UncertifiedCatcher { player } => format!(
                "Inning {}: Player {} assigned to Catcher but not marked as capable",
                self.inning,
                name(*player)
            ),
        }
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Force OUT for every unavailable player; available players are untouched.
/// Returns true when anything changed.
pub fn apply_availability(positions: &mut InningPositions, availability: &AvailabilityTable) -> bool {
    let mut changed = false;
    for (id, position) in positions.positions.iter_mut() {
        if !availability.is_available(*id) && *position != Position::Out {
            *position = Position::Out;
            changed = true;
        }
    }
    changed
}

/// Coverage, availability and catcher checks for one inning
pub fn validate(
    positions: &InningPositions,
    roster: &Roster,
    availability: &AvailabilityTable,
) -> Vec<FieldingIssueKind> {
    let mut issues = Vec::new();

    for position in FIELD_POSITIONS {
        if positions.count(position) > 1 {
            issues.push(FieldingIssueKind::DuplicateField { position });
        }
    }

    for position in FIELD_POSITIONS {
        if positions.count(position) == 0 {
            issues.push(FieldingIssueKind::MissingCoverage { position });
        }
    }

    let assigned = positions.in_roster_order(roster);
    for (player, position) in &assigned {
        if !availability.is_available(*player) && *position != Position::Out {
            issues.push(FieldingIssueKind::UnavailableNotMarkedOut {
                player: *player,
                position: *position,
            });
        }
    }

    for (player, position) in &assigned {
        if *position == Position::Catcher && !availability.can_play_catcher(*player) {
            issues.push(FieldingIssueKind::UncertifiedCatcher { player: *player });
        }
    }

    issues
}

// ============================================================================
// ROTATIONS
// ============================================================================

/// All innings of one game
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldingRotation {
    innings: BTreeMap<u32, InningPositions>,
}

impl FieldingRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored inning synced to the roster, or the default layout
    pub fn get_or_init_inning(&mut self, inning: u32, roster: &Roster) -> &mut InningPositions {
        let positions = self
            .innings
            .entry(inning)
            .or_insert_with(|| InningPositions::default_for(roster));
        positions.sync(roster);
        positions
    }

    /// Make sure every inning of the game exists
    pub fn init_all(&mut self, game: &Game, roster: &Roster) {
        for inning in game.inning_numbers() {
            self.get_or_init_inning(inning, roster);
        }
    }

    pub fn inning(&self, inning: u32) -> Option<&InningPositions> {
        self.innings.get(&inning)
    }

    pub fn set_inning(&mut self, inning: u32, positions: InningPositions) {
        self.innings.insert(inning, positions);
    }

    pub fn innings(&self) -> impl Iterator<Item = (u32, &InningPositions)> {
        self.innings.iter().map(|(n, p)| (*n, p))
    }

    /// OUT for unavailable players in every stored inning; true when changed
    pub fn auto_out_unavailable(&mut self, availability: &AvailabilityTable) -> bool {
        let mut changed = false;
        for positions in self.innings.values_mut() {
            changed |= apply_availability(positions, availability);
        }
        changed
    }

    /// Validate innings `1..=game.innings`; innings never opened are checked
    /// against the default layout they would be given.
    pub fn validate(&self, game: &Game, roster: &Roster, availability: &AvailabilityTable) -> Vec<FieldingIssue> {
        let mut issues = Vec::new();
        for inning in game.inning_numbers() {
            let default;
            let positions = match self.innings.get(&inning) {
                Some(positions) => positions,
                None => {
                    default = InningPositions::default_for(roster);
                    &default
                }
            };
            issues.extend(
                validate(positions, roster, availability)
                    .into_iter()
                    .map(|kind| FieldingIssue { inning, kind }),
            );
        }
        issues
    }

    pub fn remove_player(&mut self, player: PlayerId) {
        for positions in self.innings.values_mut() {
            positions.remove_player(player);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.innings.is_empty()
    }
}

/// Fielding rotations for every game that has one
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldingRotations {
    games: BTreeMap<GameNumber, FieldingRotation>,
}

impl FieldingRotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_init(&mut self, game: GameNumber) -> &mut FieldingRotation {
        self.games.entry(game).or_default()
    }

    pub fn get(&self, game: GameNumber) -> Option<&FieldingRotation> {
        self.games.get(&game)
    }

    pub fn insert(&mut self, game: GameNumber, rotation: FieldingRotation) {
        self.games.insert(game, rotation);
    }

    pub fn remove_game(&mut self, game: GameNumber) -> Option<FieldingRotation> {
        self.games.remove(&game)
    }

    pub fn remove_player(&mut self, player: PlayerId) {
        for rotation in self.games.values_mut() {
            rotation.remove_player(player);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GameNumber, &FieldingRotation)> {
        self.games.iter().map(|(game, rotation)| (*game, rotation))
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
