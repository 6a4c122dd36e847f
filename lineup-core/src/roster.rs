//! Roster store with stable player identity
//!
//! Players keep the [`PlayerId`] they were given when added, no matter how
//! the roster is later reordered or shrunk. The positional index only matters
//! for display order and for legacy index-keyed bundle data.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Stable player identifier, never reused within a roster
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A player on the roster
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub jersey_number: u32,
}

impl Player {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// "First Last (#12)", the label used in fairness tables
    pub fn label(&self) -> String {
        format!("{} (#{})", self.full_name(), self.jersey_number)
    }
}

/// Ordered collection of players
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from `(first, last, jersey)` rows, all-or-nothing
    pub fn from_rows<I, S>(rows: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = (S, S, u32)>,
        S: Into<String>,
    {
        let mut roster = Roster::new();
        for (first, last, jersey) in rows {
            roster.add_player(first, last, jersey)?;
        }
        roster.validate()?;
        Ok(roster)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Player ids in roster order
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.get(id).is_some()
    }

    /// Positional index of a player
    pub fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Player at a positional index
    pub fn by_index(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn by_jersey(&self, jersey: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.jersey_number == jersey)
    }

    /// Add a player; a duplicate jersey is rejected and the roster is unchanged
    pub fn add_player(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        jersey_number: u32,
    ) -> Result<PlayerId, RosterError> {
        if self.by_jersey(jersey_number).is_some() {
            return Err(RosterError::DuplicateJersey(jersey_number));
        }

        let id = PlayerId(self.next_id);
        self.next_id += 1;
        self.players.push(Player {
            id,
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            jersey_number,
        });
        Ok(id)
    }

    /// Remove a player. Per-game data keyed by the id must be pruned by the
    /// owner of that data (see `Team::remove_player`).
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player, RosterError> {
        let index = self.index_of(id).ok_or(RosterError::UnknownPlayer(id))?;
        Ok(self.players.remove(index))
    }

    /// Required fields non-empty and jersey numbers unique
    pub fn validate(&self) -> Result<(), RosterError> {
        let mut seen = FxHashSet::default();
        for player in &self.players {
            if player.first_name.is_empty() {
                return Err(RosterError::MissingValue {
                    jersey: player.jersey_number,
                    field: "first name",
                });
            }
            if player.last_name.is_empty() {
                return Err(RosterError::MissingValue {
                    jersey: player.jersey_number,
                    field: "last name",
                });
            }
            if !seen.insert(player.jersey_number) {
                return Err(RosterError::DuplicateJersey(player.jersey_number));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_players() -> Roster {
        Roster::from_rows([("Ann", "Lee", 1), ("Bo", "Diaz", 2), ("Cy", "Park", 3)]).unwrap()
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let roster = three_players();
        let ids: Vec<_> = roster.ids().collect();
        assert_eq!(ids, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
        assert_eq!(roster.get(PlayerId(1)).unwrap().label(), "Bo Diaz (#2)");
    }

    #[test]
    fn test_duplicate_jersey_rejected_and_roster_unchanged() {
        let mut roster = three_players();
        let before = roster.clone();

        let err = roster.add_player("Dee", "Fox", 2).unwrap_err();
        assert_eq!(err, RosterError::DuplicateJersey(2));
        assert_eq!(roster, before);
    }

    #[test]
    fn test_remove_keeps_other_ids_stable() {
        let mut roster = three_players();
        let removed = roster.remove_player(PlayerId(0)).unwrap();
        assert_eq!(removed.jersey_number, 1);

        assert_eq!(roster.index_of(PlayerId(2)), Some(1));
        assert_eq!(roster.get(PlayerId(2)).unwrap().jersey_number, 3);

        // Ids are never reused, even for a re-added jersey
        let id = roster.add_player("Ann", "Lee", 1).unwrap();
        assert_eq!(id, PlayerId(3));
    }

    #[test]
    fn test_jerseys_unique_after_add_remove_sequence() {
        let mut roster = three_players();
        roster.remove_player(PlayerId(1)).unwrap();
        roster.add_player("Dee", "Fox", 2).unwrap();
        assert!(roster.add_player("Eli", "Ng", 3).is_err());
        roster.add_player("Eli", "Ng", 4).unwrap();
        assert!(roster.validate().is_ok());
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn test_remove_unknown_player() {
        let mut roster = three_players();
        assert_eq!(
            roster.remove_player(PlayerId(42)).unwrap_err(),
            RosterError::UnknownPlayer(PlayerId(42))
        );
    }

    #[test]
    fn test_validate_requires_names() {
        let result = Roster::from_rows([("Ann", "", 1)]);
        assert_eq!(
            result.unwrap_err(),
            RosterError::MissingValue { jersey: 1, field: "last name" }
        );
    }
}
