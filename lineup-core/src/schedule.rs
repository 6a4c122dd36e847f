//! Game schedule

use std::ops::RangeInclusive;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::ScheduleError;

/// Unique key of a game on the schedule
pub type GameNumber = u32;

/// A scheduled game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub game_number: GameNumber,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub opponent: String,
    pub innings: u32,
}

impl Game {
    pub fn new(game_number: GameNumber, opponent: impl Into<String>, innings: u32) -> Self {
        Self {
            game_number,
            date: None,
            time: None,
            opponent: opponent.into(),
            innings,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Innings numbered from 1
    pub fn inning_numbers(&self) -> RangeInclusive<u32> {
        1..=self.innings
    }

    pub fn has_inning(&self, inning: u32) -> bool {
        self.inning_numbers().contains(&inning)
    }

    /// "Game 3 vs Tigers (06/11 05:30PM)"
    pub fn label(&self) -> String {
        let mut label = format!("Game {} vs {}", self.game_number, self.opponent);
        if let Some(date) = self.date {
            label.push_str(&format!(" ({}", date.format("%m/%d")));
            if let Some(time) = self.time {
                label.push_str(&format!(" {}", time.format("%I:%M%p")));
            }
            label.push(')');
        }
        label
    }

    /// "2023-06-11 at 05:30 PM", or just the date, or "TBD"
    pub fn date_time_text(&self) -> String {
        match (self.date, self.time) {
            (Some(date), Some(time)) => format!("{} at {}", date.format("%Y-%m-%d"), time.format("%I:%M %p")),
            (Some(date), None) => date.format("%Y-%m-%d").to_string(),
            (None, Some(time)) => time.format("%I:%M %p").to_string(),
            (None, None) => "TBD".to_string(),
        }
    }

    fn check_innings(&self, max_innings: u32) -> Result<(), ScheduleError> {
        if self.innings == 0 || self.innings > max_innings {
            return Err(ScheduleError::InvalidInnings {
                game: self.game_number,
                innings: self.innings,
                max: max_innings,
            });
        }
        Ok(())
    }
}

/// Ordered sequence of games
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    games: Vec<Game>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Games 1..=count with no opponent and the default innings
    pub fn initialize(count: usize, config: &EngineConfig) -> Result<Self, ScheduleError> {
        let last = GameNumber::try_from(count).map_err(|_| ScheduleError::TooManyGames(count))?;
        let games = (1..=last)
            .map(|n| Game::new(n, "", config.default_innings))
            .collect();
        Ok(Self { games })
    }

    /// Build from a list of games, all-or-nothing
    pub fn from_games(games: Vec<Game>, config: &EngineConfig) -> Result<Self, ScheduleError> {
        let schedule = Self { games };
        schedule.validate(config)?;
        Ok(schedule)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.iter()
    }

    pub fn game_numbers(&self) -> impl Iterator<Item = GameNumber> + '_ {
        self.games.iter().map(|g| g.game_number)
    }

    pub fn get(&self, game_number: GameNumber) -> Option<&Game> {
        self.games.iter().find(|g| g.game_number == game_number)
    }

    pub fn require(&self, game_number: GameNumber) -> Result<&Game, ScheduleError> {
        self.get(game_number).ok_or(ScheduleError::UnknownGame(game_number))
    }

    pub fn contains(&self, game_number: GameNumber) -> bool {
        self.get(game_number).is_some()
    }

    pub fn add_game(&mut self, game: Game, config: &EngineConfig) -> Result<(), ScheduleError> {
        if self.contains(game.game_number) {
            return Err(ScheduleError::DuplicateGame(game.game_number));
        }
        game.check_innings(config.max_innings)?;
        self.games.push(game);
        Ok(())
    }

    /// Replace the game with the same number
    pub fn update_game(&mut self, game: Game, config: &EngineConfig) -> Result<(), ScheduleError> {
        game.check_innings(config.max_innings)?;
        let slot = self
            .games
            .iter_mut()
            .find(|g| g.game_number == game.game_number)
            .ok_or(ScheduleError::UnknownGame(game.game_number))?;
        *slot = game;
        Ok(())
    }

    pub fn remove_game(&mut self, game_number: GameNumber) -> Result<Game, ScheduleError> {
        let index = self
            .games
            .iter()
            .position(|g| g.game_number == game_number)
            .ok_or(ScheduleError::UnknownGame(game_number))?;
        Ok(self.games.remove(index))
    }

    /// Unique game numbers and innings within `1..=max_innings`
    pub fn validate(&self, config: &EngineConfig) -> Result<(), ScheduleError> {
        let mut seen = rustc_hash::FxHashSet::default();
        for game in &self.games {
            if !seen.insert(game.game_number) {
                return Err(ScheduleError::DuplicateGame(game.game_number));
            }
            game.check_innings(config.max_innings)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_numbers_games_from_one() {
        let schedule = Schedule::initialize(3, &EngineConfig::default()).unwrap();
        let numbers: Vec<_> = schedule.game_numbers().collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(schedule.iter().all(|g| g.innings == 6));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_initialize_rejects_count_past_game_numbers() {
        let count = GameNumber::MAX as usize + 1;
        let err = Schedule::initialize(count, &EngineConfig::default()).unwrap_err();
        assert_eq!(err, ScheduleError::TooManyGames(count));
    }

    #[test]
    fn test_duplicate_game_rejected() {
        let config = EngineConfig::default();
        let mut schedule = Schedule::initialize(2, &config).unwrap();
        let err = schedule.add_game(Game::new(2, "Hawks", 6), &config).unwrap_err();
        assert_eq!(err, ScheduleError::DuplicateGame(2));
        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn test_innings_bounds() {
        let config = EngineConfig::default();
        let mut schedule = Schedule::new();
        assert!(schedule.add_game(Game::new(1, "Hawks", 0), &config).is_err());
        assert!(schedule.add_game(Game::new(1, "Hawks", 10), &config).is_err());
        assert!(schedule.add_game(Game::new(1, "Hawks", 9), &config).is_ok());
        assert!(schedule.get(1).unwrap().has_inning(9));
        assert!(!schedule.get(1).unwrap().has_inning(0));
    }

    #[test]
    fn test_game_label_with_date_and_time() {
        let game = Game::new(3, "Tigers", 6)
            .with_date(NaiveDate::from_ymd_opt(2023, 6, 11).unwrap())
            .with_time(NaiveTime::from_hms_opt(17, 30, 0).unwrap());
        assert_eq!(game.label(), "Game 3 vs Tigers (06/11 05:30PM)");
        assert_eq!(game.date_time_text(), "2023-06-11 at 05:30 PM");
        assert_eq!(Game::new(4, "Owls", 6).label(), "Game 4 vs Owls");
    }

    #[test]
    fn test_update_and_remove() {
        let config = EngineConfig::default();
        let mut schedule = Schedule::initialize(2, &config).unwrap();
        schedule.update_game(Game::new(2, "Owls", 7), &config).unwrap();
        assert_eq!(schedule.get(2).unwrap().opponent, "Owls");
        assert_eq!(schedule.remove_game(1).unwrap().game_number, 1);
        assert_eq!(schedule.remove_game(1).unwrap_err(), ScheduleError::UnknownGame(1));
    }
}
