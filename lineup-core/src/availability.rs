//! Per-game player availability
//!
//! A table is created lazily the first time a game is opened for player
//! setup and is kept in step with the roster from then on: new players get
//! the default entry, departed players are dropped.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::roster::{PlayerId, Roster};
use crate::schedule::GameNumber;

/// Availability and capability flags for one player in one game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    pub can_play_catcher: bool,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            available: true,
            can_play_catcher: false,
        }
    }
}

impl Availability {
    pub fn new(available: bool, can_play_catcher: bool) -> Self {
        Self { available, can_play_catcher }
    }

    pub fn unavailable() -> Self {
        Self::new(false, false)
    }
}

/// Result of a single availability edit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AvailabilityChange {
    pub player: PlayerId,
    pub before: Availability,
    pub after: Availability,
}

impl AvailabilityChange {
    /// The edit moved the player from available to unavailable
    pub fn became_unavailable(&self) -> bool {
        self.before.available && !self.after.available
    }
}

/// Counts shown on the player setup screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AvailabilitySummary {
    pub available: usize,
    pub unavailable: usize,
    pub catchers: usize,
}

/// Availability of every roster player for one game
///
/// Lookups for players without an entry return the default, so an empty
/// table reads as "everyone available, nobody certified at catcher".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityTable {
    entries: FxHashMap<PlayerId, Availability>,
}

impl AvailabilityTable {
    /// Fresh table with a default entry per roster player
    pub fn for_roster(roster: &Roster) -> Self {
        Self {
            entries: roster.ids().map(|id| (id, Availability::default())).collect(),
        }
    }

    /// Pad missing players with defaults and drop players not on the roster.
    /// Returns true when the table changed.
    pub fn sync(&mut self, roster: &Roster) -> bool {
        let before = self.entries.len();
        self.entries.retain(|id, _| roster.contains(*id));
        let mut changed = self.entries.len() != before;
        for id in roster.ids() {
            if !self.entries.contains_key(&id) {
                self.entries.insert(id, Availability::default());
                changed = true;
            }
        }
        changed
    }

    pub fn get(&self, player: PlayerId) -> Availability {
        self.entries.get(&player).copied().unwrap_or_default()
    }

    pub fn is_available(&self, player: PlayerId) -> bool {
        self.get(player).available
    }

    pub fn can_play_catcher(&self, player: PlayerId) -> bool {
        self.get(player).can_play_catcher
    }

    pub fn set(&mut self, player: PlayerId, availability: Availability) -> AvailabilityChange {
        let before = self.get(player);
        self.entries.insert(player, availability);
        AvailabilityChange {
            player,
            before,
            after: availability,
        }
    }

    pub fn remove_player(&mut self, player: PlayerId) {
        self.entries.remove(&player);
    }

    /// Unavailable players in roster order
    pub fn unavailable_players(&self, roster: &Roster) -> Vec<PlayerId> {
        roster.ids().filter(|id| !self.is_available(*id)).collect()
    }

    /// Entries in roster order
    pub fn in_roster_order(&self, roster: &Roster) -> Vec<(PlayerId, Availability)> {
        roster.ids().map(|id| (id, self.get(id))).collect()
    }

    pub fn summary(&self, roster: &Roster) -> AvailabilitySummary {
        roster.ids().fold(AvailabilitySummary::default(), |mut acc, id| {
            let entry = self.get(id);
            if entry.available {
                acc.available += 1;
            } else {
                acc.unavailable += 1;
            }
            if entry.can_play_catcher {
                acc.catchers += 1;
            }
            acc
        })
    }
}

/// Availability tables for every game that has been opened
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityTracker {
    tables: BTreeMap<GameNumber, AvailabilityTable>,
}

impl AvailabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing table resized to the roster, or a fresh default table
    pub fn get_or_init(&mut self, game: GameNumber, roster: &Roster) -> &mut AvailabilityTable {
        let table = self.tables.entry(game).or_insert_with(|| {
            tracing::debug!("Initializing availability for game {}", game);
            AvailabilityTable::for_roster(roster)
        });
        table.sync(roster);
        table
    }

    pub fn get(&self, game: GameNumber) -> Option<&AvailabilityTable> {
        self.tables.get(&game)
    }

    /// Read-only view for a game: the stored table or all defaults
    pub fn snapshot(&self, game: GameNumber) -> AvailabilityTable {
        self.tables.get(&game).cloned().unwrap_or_default()
    }

    /// Set one player's flags, creating the table if needed
    pub fn set(
        &mut self,
        game: GameNumber,
        roster: &Roster,
        player: PlayerId,
        availability: Availability,
    ) -> AvailabilityChange {
        self.get_or_init(game, roster).set(player, availability)
    }

    pub fn insert(&mut self, game: GameNumber, table: AvailabilityTable) {
        self.tables.insert(game, table);
    }

    pub fn remove_game(&mut self, game: GameNumber) -> Option<AvailabilityTable> {
        self.tables.remove(&game)
    }

    pub fn remove_player(&mut self, player: PlayerId) {
        for table in self.tables.values_mut() {
            table.remove_player(player);
        }
    }

    /// Resize every stored table to the roster
    pub fn sync_all(&mut self, roster: &Roster) {
        for table in self.tables.values_mut() {
            table.sync(roster);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GameNumber, &AvailabilityTable)> {
        self.tables.iter().map(|(game, table)| (*game, table))
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
