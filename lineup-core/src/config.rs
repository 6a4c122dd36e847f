//! Engine configuration
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

/// Defaults and limits applied by the engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Innings given to newly created games
    pub default_innings: u32,
    /// Upper bound accepted for a game's innings
    pub max_innings: u32,
    /// Rows in a blank roster template
    pub template_players: usize,
    /// Games created when a schedule is initialized without a count
    pub default_games: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_innings: 6,
            max_innings: 9,
            template_players: 14,
            default_games: 10,
        }
    }
}

impl EngineConfig {
    /// Set innings for new games
    pub fn with_default_innings(mut self, innings: u32) -> Self {
        self.default_innings = innings;
        self
    }

    /// Set the innings limit
    pub fn with_max_innings(mut self, innings: u32) -> Self {
        self.max_innings = innings;
        self
    }

    /// Set the roster template size
    pub fn with_template_players(mut self, players: usize) -> Self {
        self.template_players = players;
        self
    }

    /// Set the default schedule length
    pub fn with_default_games(mut self, games: usize) -> Self {
        self.default_games = games;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_innings, 6);
        assert_eq!(config.max_innings, 9);
        assert_eq!(config.template_players, 14);
        assert_eq!(config.default_games, 10);
    }

    #[test]
    fn test_engine_config_builders() {
        let config = EngineConfig::default()
            .with_default_innings(7)
            .with_max_innings(12)
            .with_default_games(3);
        assert_eq!(config.default_innings, 7);
        assert_eq!(config.max_innings, 12);
        assert_eq!(config.default_games, 3);
    }
}
